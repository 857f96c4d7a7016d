//! docker-compose working directories.
//!
//! Each repositories directory the sandbox was installed for gets its own
//! state directory holding the `.env` docker-compose reads:
//!
//! ```text
//! workdirs/
//!   __active__                 # absolute path of the active repos dir
//!   %2Fhome%2Fme%2Frepos/.env
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::{encode_name, read_marker, write_marker, ACTIVE_MARKER};
use crate::error::{ComposeError, Error, Result};
use crate::port::Workdirs;

pub const WORKDIRS_DIR: &str = "workdirs";
pub const ENV_FILE_NAME: &str = ".env";

#[derive(Debug, Clone)]
pub struct WorkdirStore {
    root: PathBuf,
}

impl WorkdirStore {
    pub fn new(home: &Path) -> Self {
        Self {
            root: home.join(WORKDIRS_DIR),
        }
    }

    /// State directory for a repositories directory.
    #[must_use]
    pub fn dir_for(&self, repos_dir: &Path) -> PathBuf {
        self.root.join(encode_name(&repos_dir.to_string_lossy()))
    }

    /// Create (or refresh) the state directory for `repos_dir` and its `.env`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDirectory`] unless `repos_dir` is an existing
    /// directory.
    pub fn init(&self, repos_dir: &Path, project_name: &str) -> Result<PathBuf> {
        if !repos_dir.is_dir() {
            return Err(Error::InvalidDirectory(repos_dir.to_path_buf()));
        }

        let dir = self.dir_for(repos_dir);
        fs::create_dir_all(&dir)?;
        let env = format!(
            "COMPOSE_PROJECT_NAME={project_name}\nGITBASE_REPOS_DIR={}\n",
            repos_dir.display()
        );
        fs::write(dir.join(ENV_FILE_NAME), env)?;
        Ok(dir)
    }

    /// Mark an initialised repositories directory as active.
    pub fn set_active(&self, repos_dir: &Path) -> Result<()> {
        if !self.dir_for(repos_dir).join(ENV_FILE_NAME).is_file() {
            return Err(ComposeError::NoWorkdir.into());
        }

        write_marker(
            &self.root.join(ACTIVE_MARKER),
            &repos_dir.to_string_lossy(),
        )?;
        info!(repos_dir = %repos_dir.display(), "active working directory changed");
        Ok(())
    }

    /// The active repositories directory, if any.
    pub fn active(&self) -> Result<Option<PathBuf>> {
        Ok(read_marker(&self.root.join(ACTIVE_MARKER))?.map(PathBuf::from))
    }

    /// State directory of the active repositories directory, if it exists.
    pub fn active_dir(&self) -> Result<Option<PathBuf>> {
        Ok(self
            .active()?
            .map(|repos_dir| self.dir_for(&repos_dir))
            .filter(|dir| dir.is_dir()))
    }
}

impl Workdirs for WorkdirStore {
    fn init(&self, repos_dir: &Path, project_name: &str) -> Result<PathBuf> {
        WorkdirStore::init(self, repos_dir, project_name)
    }

    fn set_active(&self, repos_dir: &Path) -> Result<()> {
        WorkdirStore::set_active(self, repos_dir)
    }

    fn active(&self) -> Result<Option<PathBuf>> {
        WorkdirStore::active(self)
    }
}
