//! Miette-based error diagnostics for CLI error presentation.
//!
//! Renders configuration parse failures with the offending file content and
//! a label pointing at the problem.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(sandbox_ce::config))]
pub struct ConfigDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// The configuration file content.
    #[source_code]
    pub src: NamedSource<String>,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    /// Build a diagnostic from a TOML parse error and the text it came from.
    #[must_use]
    pub fn from_toml(path: &Path, content: String, error: &toml::de::Error) -> Self {
        let span = error
            .span()
            .map_or((0, 0), |range| (range.start, range.len()));

        Self {
            message: format!("failed to parse {}", path.display()),
            src: NamedSource::new(path.display().to_string(), content),
            span: span.into(),
            help: Some(error.message().to_string()),
        }
    }
}

/// Render a parse error for `path` as a miette report.
///
/// Returns `None` if the file can no longer be read.
#[must_use]
pub fn render_config_error(path: &Path, error: &toml::de::Error) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let report = miette::Report::new(ConfigDiagnostic::from_toml(path, content, error));
    Some(format!("{report:?}"))
}
