//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::Server;

use super::loader::{self, ConfigWarning};
use super::ConfigError;

/// A named remote host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// ssh host identifier (`host`, `user@host`, or an ssh_config alias)
    pub host: String,

    /// Remote root; workspaces land in `<root>/<slug>`
    #[serde(default = "default_root")]
    pub root: String,
}

fn default_root() -> String {
    ".".to_string()
}

/// Sync configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_true")]
    pub remote_lock: bool,

    /// Default exclude-pattern file; `--exclude-file` overrides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_file: Option<PathBuf>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            remote_lock: true,
            exclude_file: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Per-stage deadlines in seconds. 0 disables a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    #[serde(default = "default_check_timeout")]
    pub check: u64,

    #[serde(default = "default_transfer_timeout")]
    pub transfer: u64,

    #[serde(default = "default_clone_timeout")]
    pub clone: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            check: default_check_timeout(),
            transfer: default_transfer_timeout(),
            clone: default_clone_timeout(),
        }
    }
}

fn default_check_timeout() -> u64 {
    30
}

fn default_transfer_timeout() -> u64 {
    3600
}

fn default_clone_timeout() -> u64 {
    1800
}

/// ssh client options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshConfig {
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    #[serde(default = "default_true")]
    pub batch_mode: bool,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            connect_timeout: default_connect_timeout(),
            batch_mode: true,
        }
    }
}

fn default_connect_timeout() -> u64 {
    10
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub servers: BTreeMap<String, ServerConfig>,

    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub timeouts: TimeoutsConfig,

    #[serde(default)]
    pub ssh: SshConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::load_with_warnings(path)
    }

    /// Load from an explicit path, the project file, the user file, or defaults.
    pub fn discover(
        explicit: Option<&Path>,
        project_dir: &Path,
    ) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        loader::discover(explicit, project_dir)
    }

    /// Resolve a server argument: a configured name, or an ad-hoc
    /// `host[:root]` spec.
    pub fn resolve_server(&self, name: &str) -> Server {
        match self.servers.get(name) {
            Some(server) => Server::new(name, &server.host, &server.root),
            None => Server::parse(name),
        }
    }
}
