//! CLI module graph.

pub mod command;
pub mod compose;
pub mod diagnostic;
pub mod install;
pub mod output;
pub mod web;

use crate::application::Sandbox;
use crate::error::Result;
use command::Commands;

/// Run the parsed subcommand against `sandbox`.
pub async fn dispatch(sandbox: &Sandbox, command: &Commands) -> Result<()> {
    match command {
        Commands::Install(args) => install::execute(sandbox, args).await,
        Commands::Web => web::execute(sandbox).await,
        Commands::Compose(command) => compose::execute(sandbox, command).await,
    }
}
