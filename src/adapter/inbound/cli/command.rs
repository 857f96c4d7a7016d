//! Command-line interface definitions.
//!
//! Defines the CLI structure for the sandbox-ce application using `clap`.
//! The CLI installs the sandbox for a repositories directory, reopens its
//! UI, and manages the docker compose files it runs from.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::infrastructure::config::paths;

/// Local source{d} sandbox launcher
#[derive(Parser, Debug)]
#[command(name = "sandbox-ce")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the sandbox-ce CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install and start the sandbox for a repositories directory
    Install(InstallArgs),

    /// Open the UI of a running sandbox in the browser
    Web,

    /// Manage docker compose files
    #[command(subcommand)]
    Compose(ComposeCommand),
}

/// Arguments for the `install` subcommand.
#[derive(Parser, Debug)]
pub struct InstallArgs {
    /// Directory holding the git repositories (defaults to the current directory)
    pub workdir: Option<PathBuf>,
}

/// Subcommands for `sandbox-ce compose`.
#[derive(Subcommand, Debug)]
pub enum ComposeCommand {
    /// Download a docker compose file revision or URL and make it active
    Download {
        /// Git revision of the compose repository, or a URL (defaults to the configured revision)
        version: Option<String>,
    },
    /// List downloaded docker compose files
    List,
    /// Make a docker compose file active, downloading it if needed
    Set {
        /// Revision or URL to activate
        version: String,
    },
}
