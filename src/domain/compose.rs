//! Compose file bookkeeping types.

/// One downloaded compose file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeFileEntry {
    /// Git revision of the compose repository, or the URL it came from.
    pub version: String,
    pub active: bool,
}
