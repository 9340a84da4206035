//! Configuration module for Hoist
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (HOIST_*)
//! 3. `--config <path>`, else project config (`./.hoist.toml`)
//! 4. User config (`$XDG_CONFIG_HOME/hoist/config.toml`)
//! 5. Built-in defaults (lowest priority)

use std::io;
use std::path::PathBuf;

use thiserror::Error;

mod loader;
mod types;

pub use loader::{ConfigWarning, PROJECT_CONFIG};
pub use types::{Config, ServerConfig, SshConfig, SyncConfig, TimeoutsConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}
