//! docker-compose invocation and compose file source configuration.

use serde::Deserialize;

/// How the orchestrator executable is invoked and where compose files come from.
#[derive(Debug, Clone, Deserialize)]
pub struct ComposeConfig {
    /// Orchestrator executable.
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Arguments placed before every command (e.g. `["compose"]` when
    /// `binary = "docker"`).
    #[serde(default)]
    pub args: Vec<String>,
    /// Compose project name written to each working directory's `.env`.
    #[serde(default = "default_project_name")]
    pub project_name: String,
    /// Base URL revisions are downloaded from.
    #[serde(default = "default_repository_url")]
    pub repository_url: String,
    /// Revision downloaded when none is given.
    #[serde(default = "default_revision")]
    pub default_revision: String,
}

fn default_binary() -> String {
    "docker-compose".into()
}

fn default_project_name() -> String {
    "srcd".into()
}

fn default_repository_url() -> String {
    "https://raw.githubusercontent.com/src-d/superset-compose".into()
}

fn default_revision() -> String {
    "master".into()
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            args: Vec::new(),
            project_name: default_project_name(),
            repository_url: default_repository_url(),
            default_revision: default_revision(),
        }
    }
}
