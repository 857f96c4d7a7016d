//! Downloaded docker-compose file revisions.
//!
//! Layout under the state root:
//!
//! ```text
//! compose-files/
//!   __active__                  # name of the active version
//!   master/docker-compose.yml
//!   v0.0.1/docker-compose.yml
//!   https%3A%2F%2F.../docker-compose.yml
//! ```
//!
//! A version is either a git revision of the compose repository or a URL to
//! a compose file. Versions are url-encoded into directory names so URLs fit
//! in one path segment and can be listed back verbatim.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use super::{decode_name, encode_name, read_marker, write_marker, ACTIVE_MARKER};
use crate::domain::ComposeFileEntry;
use crate::error::{ComposeError, Result};
use crate::port::{ComposeFiles, Fetcher};

pub const COMPOSE_FILES_DIR: &str = "compose-files";
pub const COMPOSE_FILE_NAME: &str = "docker-compose.yml";

#[derive(Debug, Clone)]
pub struct ComposeFileStore {
    root: PathBuf,
    repository_url: String,
}

impl ComposeFileStore {
    /// Create a store rooted at `<home>/compose-files`. Revisions are fetched
    /// from `<repository_url>/<revision>/docker-compose.yml`.
    pub fn new(home: &Path, repository_url: impl Into<String>) -> Self {
        Self {
            root: home.join(COMPOSE_FILES_DIR),
            repository_url: repository_url.into(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the compose file for `version` lives (whether or not it exists).
    #[must_use]
    pub fn path_for(&self, version: &str) -> PathBuf {
        self.root.join(encode_name(version)).join(COMPOSE_FILE_NAME)
    }

    #[must_use]
    pub fn contains(&self, version: &str) -> bool {
        self.path_for(version).is_file()
    }

    /// The URL a version is downloaded from.
    ///
    /// # Errors
    ///
    /// Fails for empty versions and for URLs that do not parse.
    pub fn source_url(&self, version: &str) -> Result<Url> {
        let version = validate_version(version)?;
        if is_url(version) {
            return Ok(Url::parse(version)?);
        }

        let base = self.repository_url.trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{version}/{COMPOSE_FILE_NAME}"))?)
    }

    /// Download `version` and make it the active compose file.
    pub async fn download(&self, fetcher: &dyn Fetcher, version: &str) -> Result<PathBuf> {
        let version = validate_version(version)?;
        let url = self.source_url(version)?;
        info!(version, %url, "downloading docker compose file");

        let contents = fetcher.fetch(&url).await?;
        let path = self.path_for(version);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, contents)?;
        debug!(path = %path.display(), "docker compose file written");

        self.set_active(version)?;
        Ok(path)
    }

    /// Downloaded versions, sorted, with the active one flagged.
    pub fn list(&self) -> Result<Vec<ComposeFileEntry>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let active = self.active()?;
        let mut versions = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.path().join(COMPOSE_FILE_NAME).is_file() {
                continue;
            }
            versions.push(decode_name(&entry.file_name().to_string_lossy()));
        }
        versions.sort();

        Ok(versions
            .into_iter()
            .map(|version| ComposeFileEntry {
                active: active.as_deref() == Some(version.as_str()),
                version,
            })
            .collect())
    }

    /// The active version, if one was ever set.
    pub fn active(&self) -> Result<Option<String>> {
        read_marker(&self.root.join(ACTIVE_MARKER))
    }

    /// Path of the active compose file, if it is still on disk.
    pub fn active_path(&self) -> Result<Option<PathBuf>> {
        Ok(self
            .active()?
            .map(|version| self.path_for(&version))
            .filter(|path| path.is_file()))
    }

    /// Mark an already downloaded version as active.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::MissingFile`] if `version` is not downloaded.
    pub fn set_active(&self, version: &str) -> Result<()> {
        let version = validate_version(version)?;
        if !self.contains(version) {
            return Err(ComposeError::MissingFile {
                version: version.to_string(),
            }
            .into());
        }

        write_marker(&self.root.join(ACTIVE_MARKER), version)?;
        info!(version, "active docker compose file changed");
        Ok(())
    }
}

#[async_trait]
impl ComposeFiles for ComposeFileStore {
    fn contains(&self, version: &str) -> bool {
        ComposeFileStore::contains(self, version)
    }

    async fn download(&self, fetcher: &dyn Fetcher, version: &str) -> Result<PathBuf> {
        ComposeFileStore::download(self, fetcher, version).await
    }

    fn list(&self) -> Result<Vec<ComposeFileEntry>> {
        ComposeFileStore::list(self)
    }

    fn active(&self) -> Result<Option<String>> {
        ComposeFileStore::active(self)
    }

    fn set_active(&self, version: &str) -> Result<()> {
        ComposeFileStore::set_active(self, version)
    }
}

fn validate_version(version: &str) -> Result<&str> {
    let version = version.trim();
    if version.is_empty() {
        return Err(ComposeError::InvalidVersion {
            version: version.to_string(),
            reason: "must not be empty".to_string(),
        }
        .into());
    }
    if version == ACTIVE_MARKER {
        return Err(ComposeError::InvalidVersion {
            version: version.to_string(),
            reason: "name is reserved".to_string(),
        }
        .into());
    }
    Ok(version)
}

fn is_url(version: &str) -> bool {
    version.starts_with("http://") || version.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tempfile::TempDir;

    use super::*;
    use crate::error::Error;

    const REPO: &str = "https://raw.githubusercontent.com/src-d/superset-compose";

    #[derive(Default)]
    struct MapFetcher {
        bodies: HashMap<String, String>,
    }

    impl MapFetcher {
        fn serving(url: &str, body: &str) -> Self {
            let mut fetcher = Self::default();
            fetcher.bodies.insert(url.to_string(), body.to_string());
            fetcher
        }
    }

    #[async_trait]
    impl Fetcher for MapFetcher {
        async fn fetch(&self, url: &Url) -> Result<String> {
            self.bodies.get(url.as_str()).cloned().ok_or_else(|| {
                ComposeError::Download {
                    url: url.to_string(),
                    reason: "404 Not Found".to_string(),
                }
                .into()
            })
        }
    }

    fn store() -> (TempDir, ComposeFileStore) {
        let home = tempfile::tempdir().expect("Failed to create temp directory");
        let store = ComposeFileStore::new(home.path(), REPO);
        (home, store)
    }

    #[test]
    fn revisions_map_to_repository_urls() {
        let (_home, store) = store();
        assert_eq!(
            store.source_url("v0.0.1").unwrap().as_str(),
            format!("{REPO}/v0.0.1/docker-compose.yml")
        );
    }

    #[test]
    fn urls_are_used_verbatim() {
        let (_home, store) = store();
        let url = "https://example.com/files/docker-compose.yml";
        assert_eq!(store.source_url(url).unwrap().as_str(), url);
    }

    #[test]
    fn empty_version_is_rejected() {
        let (_home, store) = store();
        assert!(matches!(
            store.source_url("  "),
            Err(Error::Compose(ComposeError::InvalidVersion { .. }))
        ));
    }

    #[tokio::test]
    async fn download_writes_file_and_activates_it() {
        let (_home, store) = store();
        let fetcher = MapFetcher::serving(
            &format!("{REPO}/master/docker-compose.yml"),
            "version: '3'\n",
        );

        let path = store.download(&fetcher, "master").await.unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "version: '3'\n");
        assert_eq!(store.active().unwrap().as_deref(), Some("master"));
        assert_eq!(store.active_path().unwrap(), Some(path));
    }

    #[tokio::test]
    async fn failed_download_leaves_no_trace() {
        let (_home, store) = store();
        let fetcher = MapFetcher::default();

        assert!(store.download(&fetcher, "v9.9.9").await.is_err());
        assert!(!store.contains("v9.9.9"));
        assert_eq!(store.active().unwrap(), None);
        assert!(store.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn url_versions_round_trip_through_list() {
        let (_home, store) = store();
        let url = "https://example.com/a/docker-compose.yml";
        let fetcher = MapFetcher::serving(url, "services: {}\n");

        store.download(&fetcher, url).await.unwrap();

        let entries = store.list().unwrap();
        assert_eq!(
            entries,
            vec![ComposeFileEntry {
                version: url.to_string(),
                active: true,
            }]
        );
        let dir = store.path_for(url);
        let segment = dir.parent().unwrap().file_name().unwrap().to_string_lossy();
        assert!(!segment.contains('/'));
    }

    #[tokio::test]
    async fn list_flags_only_the_active_version() {
        let (_home, store) = store();
        let mut fetcher = MapFetcher::default();
        for version in ["master", "v0.0.1"] {
            fetcher.bodies.insert(
                format!("{REPO}/{version}/docker-compose.yml"),
                format!("# {version}\n"),
            );
        }

        store.download(&fetcher, "v0.0.1").await.unwrap();
        store.download(&fetcher, "master").await.unwrap();
        store.set_active("v0.0.1").unwrap();

        let entries = store.list().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].version, "master");
        assert!(!entries[0].active);
        assert_eq!(entries[1].version, "v0.0.1");
        assert!(entries[1].active);
    }

    #[test]
    fn set_active_requires_a_download() {
        let (_home, store) = store();
        let err = store.set_active("v1.0.0").unwrap_err();
        assert!(matches!(
            err,
            Error::Compose(ComposeError::MissingFile { ref version }) if version == "v1.0.0"
        ));
    }

    #[test]
    fn list_of_missing_root_is_empty() {
        let (_home, store) = store();
        assert!(store.list().unwrap().is_empty());
        assert_eq!(store.active_path().unwrap(), None);
    }
}
