use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::domain::readiness::human_duration;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised while driving docker-compose or managing its files.
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("could not run {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}{}", stderr_suffix(.stderr))]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("no active working directory, run `sandbox-ce install` first")]
    NoWorkdir,

    #[error("no active docker compose file, run `sandbox-ce compose download` first")]
    NoComposeFile,

    #[error("docker compose file for version '{version}' has not been downloaded")]
    MissingFile { version: String },

    #[error("invalid version '{version}': {reason}")]
    InvalidVersion { version: String, reason: String },

    #[error("failed to download {url}: {reason}")]
    Download { url: String, reason: String },
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Failures of the readiness wait that are not plain "not yet" answers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadinessError {
    #[error("no address found")]
    EmptyAddress,

    #[error("invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("readiness polling was cancelled")]
    Cancelled,

    #[error("{phase} gave up after {attempts} attempts")]
    AttemptsExhausted { phase: &'static str, attempts: u32 },

    #[error("readiness task failed: {0}")]
    Task(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error(transparent)]
    Readiness(#[from] ReadinessError),

    #[error("error opening the UI, the container is not running after {}", human_duration(.timeout))]
    UiTimeout { timeout: Duration },

    #[error("an error occurred while opening the UI: {0}")]
    OpenUi(#[source] ReadinessError),

    #[error("path '{}' is not a valid directory", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
