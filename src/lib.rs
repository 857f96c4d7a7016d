//! sandbox-ce - local source{d} sandbox launcher.
//!
//! Brings up a docker-compose project for a directory of git repositories,
//! waits until its web UI answers, and opens it in the browser.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Endpoints, readiness requests and outcomes
//! - [`port`] - Traits for the process runner, probes, progress, and state
//! - [`application`] - The readiness orchestrator and the sandbox use cases
//! - [`adapter`] - docker-compose, HTTP, terminal, browser, flat-file state, CLI
//! - [`infrastructure`] - Configuration and wiring
//! - [`runtime`] - Task stop signals
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use sandbox_ce::infrastructure::bootstrap::build_sandbox;
//! use sandbox_ce::infrastructure::config::Config;
//!
//! # async fn run() -> sandbox_ce::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let sandbox = build_sandbox(&config, true);
//! let opened = sandbox.web().await?;
//! println!("{}", opened.url);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
pub mod runtime;
