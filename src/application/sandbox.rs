//! Sandbox use cases: installing, opening the UI, and managing compose files.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use super::readiness::ReadinessOrchestrator;
use crate::domain::{ComposeFileEntry, OrchestrationOutcome, ReadinessRequest, RetryPolicy};
use crate::error::{Error, Result};
use crate::port::{BrowserLauncher, ComposeFiles, ComposeRunner, Fetcher, Workdirs};

/// Values the sandbox use cases need from configuration.
#[derive(Debug, Clone)]
pub struct SandboxSettings {
    pub project_name: String,
    pub default_revision: String,
    pub service: String,
    pub port: u16,
    pub install_timeout: Duration,
    pub web_timeout: Duration,
    pub retry: RetryPolicy,
    pub open_browser: bool,
}

/// Result of waiting for the UI and handing it to the browser.
#[derive(Debug)]
pub struct OpenedUi {
    pub url: Url,
    /// Set when the browser could not be launched. Never fatal.
    pub browser_error: Option<Error>,
}

/// Where `install` left its state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedWorkdir {
    /// Absolute repositories directory.
    pub repos_dir: PathBuf,
    /// State directory holding the `.env` docker-compose reads.
    pub state_dir: PathBuf,
}

pub struct Sandbox {
    compose: Arc<dyn ComposeRunner>,
    files: Arc<dyn ComposeFiles>,
    workdirs: Arc<dyn Workdirs>,
    fetcher: Arc<dyn Fetcher>,
    browser: Arc<dyn BrowserLauncher>,
    readiness: ReadinessOrchestrator,
    settings: SandboxSettings,
}

impl Sandbox {
    pub fn new(
        compose: Arc<dyn ComposeRunner>,
        files: Arc<dyn ComposeFiles>,
        workdirs: Arc<dyn Workdirs>,
        fetcher: Arc<dyn Fetcher>,
        browser: Arc<dyn BrowserLauncher>,
        readiness: ReadinessOrchestrator,
        settings: SandboxSettings,
    ) -> Self {
        Self {
            compose,
            files,
            workdirs,
            fetcher,
            browser,
            readiness,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &SandboxSettings {
        &self.settings
    }

    /// Make `repos_dir` (or the current directory) the active working
    /// directory and ensure a compose file is selected.
    ///
    /// Containers of a previously active working directory are stopped first;
    /// failures there are logged and ignored.
    ///
    pub async fn prepare(&self, repos_dir: Option<&Path>) -> Result<PreparedWorkdir> {
        let repos_dir = resolve_dir(repos_dir)?;
        let state_dir = self.workdirs.init(&repos_dir, &self.settings.project_name)?;

        if self.workdirs.active()?.is_some() {
            if let Err(e) = self.compose.run(&["stop"]).await {
                debug!(error = %e, "stopping previous containers failed, continuing");
            }
        }

        self.workdirs.set_active(&repos_dir)?;
        self.ensure_compose_file().await?;
        Ok(PreparedWorkdir {
            repos_dir,
            state_dir,
        })
    }

    /// Start the containers in the background.
    pub async fn start(&self) -> Result<()> {
        self.compose.run(&["up", "--detach"]).await
    }

    /// Wait for freshly started containers with the install timeout.
    pub async fn open_installed_ui(&self) -> Result<OpenedUi> {
        self.open_ui(self.settings.install_timeout).await
    }

    /// `web`: wait for an already running UI with the short timeout.
    pub async fn web(&self) -> Result<OpenedUi> {
        self.open_ui(self.settings.web_timeout).await
    }

    /// Wait up to `timeout` for the UI and open it in the browser.
    pub async fn open_ui(&self, timeout: Duration) -> Result<OpenedUi> {
        let request = ReadinessRequest::new(&self.settings.service, self.settings.port, timeout)
            .with_retry(self.settings.retry);

        let url = match self.readiness.wait(request).await {
            OrchestrationOutcome::Ready(url) => url,
            OrchestrationOutcome::TimedOut => return Err(Error::UiTimeout { timeout }),
            OrchestrationOutcome::Failed(e) => return Err(Error::OpenUi(e)),
        };

        if !self.settings.open_browser {
            return Ok(OpenedUi {
                url,
                browser_error: None,
            });
        }

        let browser_error = match self.browser.open(&url).await {
            Ok(()) => None,
            Err(e) => {
                debug!(%url, error = %e, "could not open the browser");
                Some(e)
            }
        };

        Ok(OpenedUi { url, browser_error })
    }

    /// Download `version` (or the default revision) and make it active.
    pub async fn download(&self, version: Option<&str>) -> Result<PathBuf> {
        let version = version.unwrap_or(&self.settings.default_revision);
        self.files.download(self.fetcher.as_ref(), version).await
    }

    pub fn list(&self) -> Result<Vec<ComposeFileEntry>> {
        self.files.list()
    }

    /// Make `version` active, downloading it first when it is missing.
    pub async fn set(&self, version: &str) -> Result<()> {
        if !self.files.contains(version) {
            info!(version, "compose file not downloaded yet, fetching it");
            self.files.download(self.fetcher.as_ref(), version).await?;
        }
        self.files.set_active(version)
    }

    async fn ensure_compose_file(&self) -> Result<()> {
        let active = self.files.active()?;
        match active {
            Some(version) if self.files.contains(&version) => Ok(()),
            _ => {
                info!(
                    version = %self.settings.default_revision,
                    "no active compose file, downloading the default revision"
                );
                self.download(None).await.map(|_| ())
            }
        }
    }
}

/// Absolute form of the requested repositories directory.
fn resolve_dir(dir: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let dir = match dir {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => cwd.join(dir),
        None => cwd,
    };

    if !dir.is_dir() {
        return Err(Error::InvalidDirectory(dir));
    }
    dir.canonicalize().map_err(|_| Error::InvalidDirectory(dir))
}
