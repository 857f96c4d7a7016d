use std::process::ExitCode;

use clap::Parser;
use sandbox_ce::adapter::inbound::cli::command::Cli;
use sandbox_ce::adapter::inbound::cli::{diagnostic, dispatch, output};
use sandbox_ce::error::{ConfigError, Error};
use sandbox_ce::infrastructure::bootstrap::build_sandbox;
use sandbox_ce::infrastructure::config::Config;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    output::configure_colors(&cli.color);
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(Error::Config(ConfigError::Parse(e))) => {
            match diagnostic::render_config_error(&cli.config, &e) {
                Some(report) => eprintln!("{report}"),
                None => output::error(&format!("failed to parse config: {e}")),
            }
            return ExitCode::FAILURE;
        }
        Err(e) => {
            output::error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    config.logging.clone().with_verbosity(cli.verbose).init();
    debug!(config = %cli.config.display(), "configuration loaded");

    let sandbox = build_sandbox(&config, output::current().interactive());
    match dispatch(&sandbox, &cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "command failed");
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
