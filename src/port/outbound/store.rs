//! Persisted sandbox state ports.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::fetch::Fetcher;
use crate::domain::ComposeFileEntry;
use crate::error::Result;

/// Downloaded compose file revisions and the active selection.
#[async_trait]
pub trait ComposeFiles: Send + Sync {
    /// Whether `version` has been downloaded.
    fn contains(&self, version: &str) -> bool;

    /// Download `version` with `fetcher` and make it active.
    async fn download(&self, fetcher: &dyn Fetcher, version: &str) -> Result<PathBuf>;

    /// Downloaded versions, sorted, with the active one flagged.
    fn list(&self) -> Result<Vec<ComposeFileEntry>>;

    /// The active version, if any.
    fn active(&self) -> Result<Option<String>>;

    /// Mark an already downloaded version as active.
    fn set_active(&self, version: &str) -> Result<()>;
}

/// Per-repositories-directory working directories.
pub trait Workdirs: Send + Sync {
    /// Create or refresh the working directory for `repos_dir`.
    fn init(&self, repos_dir: &Path, project_name: &str) -> Result<PathBuf>;

    /// Mark an initialised repositories directory as active.
    fn set_active(&self, repos_dir: &Path) -> Result<()>;

    /// The active repositories directory, if any.
    fn active(&self) -> Result<Option<PathBuf>>;
}
