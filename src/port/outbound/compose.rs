//! Container orchestrator port.

use async_trait::async_trait;

use crate::error::Result;

/// Runs the orchestrator executable against the active compose file and
/// working directory.
#[async_trait]
pub trait ComposeRunner: Send + Sync {
    /// Run a command, forwarding its stdio to the terminal.
    async fn run(&self, args: &[&str]) -> Result<()>;

    /// Run a command and capture its standard output.
    async fn output(&self, args: &[&str]) -> Result<String>;
}
