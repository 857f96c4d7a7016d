//! Composition root: builds the sandbox service from configuration.

use std::io::IsTerminal;
use std::sync::Arc;

use tracing::debug;

use crate::adapter::outbound::browser::SystemBrowser;
use crate::adapter::outbound::compose::{ComposePortResolver, DockerCompose};
use crate::adapter::outbound::http::{HttpFetcher, HttpProbe};
use crate::adapter::outbound::indicator::{SilentProgress, TerminalIndicator};
use crate::adapter::outbound::store::{ComposeFileStore, WorkdirStore};
use crate::application::{ReadinessOrchestrator, Sandbox, SandboxSettings};
use crate::infrastructure::config::settings::Config;
use crate::port::{ComposeRunner, ProgressReporter};

/// Build sandbox settings from configuration.
#[must_use]
pub fn build_settings(config: &Config) -> SandboxSettings {
    SandboxSettings {
        project_name: config.compose.project_name.clone(),
        default_revision: config.compose.default_revision.clone(),
        service: config.ui.service.clone(),
        port: config.ui.port,
        install_timeout: config.ui.install_timeout(),
        web_timeout: config.ui.web_timeout(),
        retry: config.ui.retry_policy(),
        open_browser: config.ui.open_browser,
    }
}

/// Wire every adapter into a [`Sandbox`].
///
/// `show_progress` selects the terminal spinner when stdout is a terminal;
/// otherwise waits are silent.
#[must_use]
pub fn build_sandbox(config: &Config, show_progress: bool) -> Sandbox {
    let home = config.home_dir();
    debug!(home = %home.display(), "using state root");

    let files = ComposeFileStore::new(&home, config.compose.repository_url.clone());
    let workdirs = WorkdirStore::new(&home);

    let compose: Arc<dyn ComposeRunner> = Arc::new(DockerCompose::new(
        &config.compose,
        files.clone(),
        workdirs.clone(),
    ));
    let progress: Arc<dyn ProgressReporter> =
        if draws_indicator(show_progress, std::io::stdout().is_terminal()) {
            Arc::new(TerminalIndicator::new())
        } else {
            Arc::new(SilentProgress)
        };

    let readiness = ReadinessOrchestrator::new(
        Arc::new(ComposePortResolver::new(Arc::clone(&compose))),
        Arc::new(HttpProbe::new(config.ui.probe_timeout())),
        progress,
    )
    .with_indicator_threshold(config.ui.indicator_threshold())
    .with_message(config.ui.message.clone());

    Sandbox::new(
        compose,
        Arc::new(files),
        Arc::new(workdirs),
        Arc::new(HttpFetcher::default()),
        Arc::new(SystemBrowser),
        readiness,
        build_settings(config),
    )
}

/// Draw the spinner only for interactive output on a terminal.
fn draws_indicator(show_progress: bool, stdout_is_terminal: bool) -> bool {
    show_progress && stdout_is_terminal
}
