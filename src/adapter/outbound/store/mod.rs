//! Flat-file state under the per-user state root.
//!
//! Both stores follow the same convention: one directory per entry, named by
//! url-encoding the entry's key, plus an `__active__` marker file holding the
//! key of the selected entry.

pub mod compose_file;
pub mod workdir;

use std::fs;
use std::io;
use std::path::Path;

pub use compose_file::ComposeFileStore;
pub use workdir::WorkdirStore;

use crate::error::Result;

/// File naming the active entry of a store.
pub const ACTIVE_MARKER: &str = "__active__";

/// Map a key onto a single, reversible path segment.
pub(crate) fn encode_name(key: &str) -> String {
    urlencoding::encode(key).into_owned()
}

/// Inverse of [`encode_name`]. Names that do not decode are returned as-is.
pub(crate) fn decode_name(name: &str) -> String {
    urlencoding::decode(name)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| name.to_string())
}

/// Read a marker file. A missing or blank marker means "nothing active".
pub(crate) fn read_marker(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let value = contents.trim();
            Ok((!value.is_empty()).then(|| value.to_string()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn write_marker(path: &Path, value: &str) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, value)?;
    Ok(())
}
