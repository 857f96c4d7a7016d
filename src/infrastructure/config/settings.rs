//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is read from an optional TOML file; every field has a
//! default, so a missing file yields a working configuration.
//!
//! # Example
//!
//! ```no_run
//! use sandbox_ce::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.logging.init();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::compose::ComposeConfig;
use super::logging::LoggingConfig;
use super::paths;
use super::ui::UiConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// State root for compose files and working directories.
    ///
    /// Defaults to `~/.srcd`.
    #[serde(default)]
    pub home: Option<PathBuf>,

    /// docker-compose invocation settings.
    #[serde(default)]
    pub compose: ComposeConfig,

    /// Which service to wait for and how long.
    #[serde(default)]
    pub ui: UiConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// A file that does not exist yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Effective state root.
    #[must_use]
    pub fn home_dir(&self) -> PathBuf {
        self.home.clone().unwrap_or_else(paths::home_dir)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.compose.binary.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "binary" }.into());
        }
        if self.compose.project_name.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "project_name",
            }
            .into());
        }
        if self.compose.default_revision.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "default_revision",
            }
            .into());
        }
        if let Err(e) = url::Url::parse(&self.compose.repository_url) {
            return Err(ConfigError::InvalidValue {
                field: "repository_url",
                reason: e.to_string(),
            }
            .into());
        }

        if self.ui.service.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "service" }.into());
        }
        if self.ui.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "port",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.ui.retry_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry_interval_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.ui.probe_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "probe_timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.ui.install_timeout_secs == 0 || self.ui.web_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "timeouts must be greater than 0".to_string(),
            }
            .into());
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("expected 'pretty' or 'json', got '{}'", self.logging.format),
            }
            .into());
        }

        Ok(())
    }
}
