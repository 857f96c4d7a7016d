//! docker-compose process adapter.
//!
//! Every invocation has the shape
//! `<binary> [args..] --project-directory <workdir> -f <compose-file> <command..>`
//! and runs with the active working directory as its current directory, so
//! docker-compose picks up the `.env` written there at install time.

use std::process::{ExitStatus, Stdio};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::store::{ComposeFileStore, WorkdirStore};
use crate::error::{ComposeError, Result};
use crate::infrastructure::config::compose::ComposeConfig;
use crate::port::{ComposeRunner, EndpointResolver};

/// Runs docker-compose against the active compose file and working directory.
pub struct DockerCompose {
    binary: String,
    args: Vec<String>,
    files: ComposeFileStore,
    workdirs: WorkdirStore,
}

impl DockerCompose {
    pub fn new(config: &ComposeConfig, files: ComposeFileStore, workdirs: WorkdirStore) -> Self {
        Self {
            binary: config.binary.clone(),
            args: config.args.clone(),
            files,
            workdirs,
        }
    }

    fn command(&self, args: &[&str]) -> Result<(Command, String)> {
        let workdir = self.workdirs.active_dir()?.ok_or(ComposeError::NoWorkdir)?;
        let file = self
            .files
            .active_path()?
            .ok_or(ComposeError::NoComposeFile)?;

        let mut full: Vec<String> = self.args.clone();
        full.push("--project-directory".into());
        full.push(workdir.to_string_lossy().into_owned());
        full.push("-f".into());
        full.push(file.to_string_lossy().into_owned());
        full.extend(args.iter().map(|arg| (*arg).to_string()));

        let rendered = std::iter::once(self.binary.as_str())
            .chain(self.args.iter().map(String::as_str))
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        debug!(command = %rendered, workdir = %workdir.display(), "running docker-compose");

        let mut command = Command::new(&self.binary);
        command.args(&full).current_dir(&workdir);
        Ok((command, rendered))
    }

    fn spawn_error(&self, source: std::io::Error) -> ComposeError {
        ComposeError::Spawn {
            binary: self.binary.clone(),
            source,
        }
    }
}

fn check_status(command: String, status: ExitStatus, stderr: String) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    Err(ComposeError::Failed {
        command,
        status: status.to_string(),
        stderr,
    }
    .into())
}

#[async_trait]
impl ComposeRunner for DockerCompose {
    async fn run(&self, args: &[&str]) -> Result<()> {
        let (mut command, rendered) = self.command(args)?;
        let status = command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

        check_status(rendered, status, String::new())
    }

    async fn output(&self, args: &[&str]) -> Result<String> {
        let (mut command, rendered) = self.command(args)?;
        let output = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        check_status(
            rendered,
            output.status,
            String::from_utf8_lossy(&output.stderr).into_owned(),
        )?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Resolves a service's published port with `docker-compose port`.
pub struct ComposePortResolver {
    compose: Arc<dyn ComposeRunner>,
}

impl ComposePortResolver {
    pub fn new(compose: Arc<dyn ComposeRunner>) -> Self {
        Self { compose }
    }
}

#[async_trait]
impl EndpointResolver for ComposePortResolver {
    async fn resolve(&self, service: &str, port: u16) -> Result<String> {
        let port = port.to_string();
        self.compose.output(&["port", service, &port]).await
    }
}
