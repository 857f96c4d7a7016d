//! Web UI readiness configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::RetryPolicy;

/// Which service to wait for and how long.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Compose service exposing the UI.
    #[serde(default = "default_service")]
    pub service: String,
    /// Container port of the UI.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Wait budget after `install` (seconds).
    #[serde(default = "default_install_timeout_secs")]
    pub install_timeout_secs: u64,
    /// Wait budget for `web` (seconds).
    #[serde(default = "default_web_timeout_secs")]
    pub web_timeout_secs: u64,
    /// Pause between resolve/probe attempts (milliseconds).
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
    /// Per-request probe timeout (milliseconds).
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    /// Waits longer than this show a progress indicator (seconds).
    #[serde(default = "default_indicator_threshold_secs")]
    pub indicator_threshold_secs: u64,
    /// Progress indicator text.
    #[serde(default = "default_message")]
    pub message: String,
    /// Launch the browser once the UI answers.
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

fn default_service() -> String {
    "superset".into()
}

fn default_port() -> u16 {
    8088
}

fn default_install_timeout_secs() -> u64 {
    60
}

fn default_web_timeout_secs() -> u64 {
    2
}

fn default_retry_interval_ms() -> u64 {
    1000
}

fn default_probe_timeout_ms() -> u64 {
    1000
}

fn default_indicator_threshold_secs() -> u64 {
    5
}

fn default_message() -> String {
    "Initializing source{d}...".into()
}

fn default_open_browser() -> bool {
    true
}

impl UiConfig {
    #[must_use]
    pub fn install_timeout(&self) -> Duration {
        Duration::from_secs(self.install_timeout_secs)
    }

    #[must_use]
    pub fn web_timeout(&self) -> Duration {
        Duration::from_secs(self.web_timeout_secs)
    }

    #[must_use]
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    #[must_use]
    pub fn indicator_threshold(&self) -> Duration {
        Duration::from_secs(self.indicator_threshold_secs)
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(Duration::from_millis(self.retry_interval_ms))
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            service: default_service(),
            port: default_port(),
            install_timeout_secs: default_install_timeout_secs(),
            web_timeout_secs: default_web_timeout_secs(),
            retry_interval_ms: default_retry_interval_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
            indicator_threshold_secs: default_indicator_threshold_secs(),
            message: default_message(),
            open_browser: default_open_browser(),
        }
    }
}
