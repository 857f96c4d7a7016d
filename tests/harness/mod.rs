//! Shared fixtures for CLI integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use tempfile::TempDir;

/// Throwaway state root plus a config file pointing at it.
pub struct TestHome {
    dir: TempDir,
    extra: String,
}

impl TestHome {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp directory"),
            extra: String::new(),
        }
    }

    /// Append raw TOML to the generated config.
    pub fn with_config(mut self, toml: &str) -> Self {
        self.extra.push_str(toml);
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Seed a downloaded compose file and optionally mark it active.
    pub fn seed_compose_file(&self, version: &str, active: bool) {
        let dir = self.dir.path().join("compose-files").join(version);
        fs::create_dir_all(&dir).expect("Failed to create compose file directory");
        fs::write(dir.join("docker-compose.yml"), "services: {}\n")
            .expect("Failed to write compose file");
        if active {
            fs::write(self.dir.path().join("compose-files/__active__"), version)
                .expect("Failed to write active marker");
        }
    }

    /// The binary with `--config` pointing at this home.
    pub fn command(&self) -> Command {
        let config = format!(
            "home = '{}'\n{}",
            self.dir.path().display(),
            self.extra
        );
        fs::write(self.config_path(), config).expect("Failed to write config");

        let mut cmd = cargo_bin_cmd!("sandbox-ce");
        cmd.arg("--config").arg(self.config_path());
        cmd.env_remove("RUST_LOG");
        cmd
    }
}
