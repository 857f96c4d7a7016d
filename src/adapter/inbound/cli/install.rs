//! Handler for the `install` command.

use super::command::InstallArgs;
use super::output;
use super::web::report_opened;
use crate::application::Sandbox;
use crate::error::Result;

/// Execute the install command.
pub async fn execute(sandbox: &Sandbox, args: &InstallArgs) -> Result<()> {
    let prepared = sandbox.prepare(args.workdir.as_deref()).await?;
    output::field("Repositories", prepared.repos_dir.display());
    output::field("Working directory", prepared.state_dir.display());

    sandbox.start().await?;

    let opened = sandbox.open_installed_ui().await?;
    report_opened(&opened);
    Ok(())
}
