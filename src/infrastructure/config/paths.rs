//! Path utilities for sandbox-ce.
//!
//! All state lives under `~/.srcd/`:
//! - `~/.srcd/config.toml` - optional configuration
//! - `~/.srcd/compose-files/` - downloaded docker compose files
//! - `~/.srcd/workdirs/` - per repositories directory compose state

use std::path::PathBuf;

/// Returns the state directory (`~/.srcd/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".srcd")
}

/// Returns the default config file path (`~/.srcd/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
