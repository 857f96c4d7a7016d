//! Handlers for the `compose` subcommands.

use super::command::ComposeCommand;
use super::output;
use crate::application::Sandbox;
use crate::error::Result;

/// Execute a compose subcommand.
pub async fn execute(sandbox: &Sandbox, command: &ComposeCommand) -> Result<()> {
    match command {
        ComposeCommand::Download { version } => download(sandbox, version.as_deref()).await,
        ComposeCommand::List => list(sandbox),
        ComposeCommand::Set { version } => set(sandbox, version).await,
    }
}

async fn download(sandbox: &Sandbox, version: Option<&str>) -> Result<()> {
    let version = version.unwrap_or(&sandbox.settings().default_revision);
    let pb = output::spinner(&format!("Downloading docker compose file {version}"));

    match sandbox.download(Some(version)).await {
        Ok(path) => {
            output::spinner_success(&pb, &format!("Downloaded {version}"));
            output::field("Path", path.display());
            Ok(())
        }
        Err(e) => {
            output::spinner_fail(&pb, &format!("Failed to download {version}"));
            Err(e)
        }
    }
}

fn list(sandbox: &Sandbox) -> Result<()> {
    let entries = sandbox.list()?;
    if entries.is_empty() {
        output::hint("no docker compose files downloaded, run `sandbox-ce compose download`");
        return Ok(());
    }

    for entry in &entries {
        output::compose_file(&entry.version, entry.active);
    }
    Ok(())
}

async fn set(sandbox: &Sandbox, version: &str) -> Result<()> {
    sandbox.set(version).await?;
    output::success(&format!("Active docker compose file set to {version}"));
    Ok(())
}
