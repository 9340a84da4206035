//! Configuration loading

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::types::Config;
use super::ConfigError;

/// Project-local config file name
pub const PROJECT_CONFIG: &str = ".hoist.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown config key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{}", line)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load configuration in priority order:
/// 1. `explicit` (must exist)
/// 2. `<project_dir>/.hoist.toml`
/// 3. `<user config dir>/hoist/config.toml`
/// 4. Built-in defaults
///
/// Environment overrides are applied last.
pub fn discover(
    explicit: Option<&Path>,
    project_dir: &Path,
) -> Result<(Config, Vec<ConfigWarning>), ConfigError> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let project = project_dir.join(PROJECT_CONFIG);
            let user = user_config_dir().map(|dir| dir.join("hoist").join("config.toml"));
            std::iter::once(project)
                .chain(user)
                .find(|path| path.is_file())
        }
    };

    let (config, warnings) = match candidate {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_with_warnings(&path)?
        }
        None => {
            debug!("no config file found, using defaults");
            (Config::default(), Vec::new())
        }
    };

    Ok((with_env_overrides(config), warnings))
}

/// Apply environment variable overrides (HOIST_* prefix)
fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |var| std::env::var(var).ok())
}

pub(super) fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    // HOIST_REMOTE_LOCK
    if let Some(val) = lookup("HOIST_REMOTE_LOCK") {
        config.sync.remote_lock = val.to_lowercase() != "false" && val != "0";
    }

    for (var, slot) in [
        ("HOIST_CHECK_TIMEOUT", &mut config.timeouts.check),
        ("HOIST_TRANSFER_TIMEOUT", &mut config.timeouts.transfer),
        ("HOIST_CLONE_TIMEOUT", &mut config.timeouts.clone),
    ] {
        if let Some(val) = lookup(var) {
            match val.trim().parse::<u64>() {
                Ok(secs) => *slot = secs,
                Err(_) => warn!(var, value = %val, "ignoring invalid timeout, expected seconds"),
            }
        }
    }

    config
}

/// `$XDG_CONFIG_HOME`, then the platform config directory.
fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "servers",
        "host",
        "root",
        "sync",
        "remote_lock",
        "exclude_file",
        "timeouts",
        "check",
        "transfer",
        "clone",
        "ssh",
        "connect_timeout",
        "batch_mode",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
