//! Exclude resolution
//!
//! Layers, lowest to highest: built-in defaults, workspace additions, command
//! line patterns (flags, then pattern file). Workspace removals and
//! `include_env` only subtract from the defaults. Force-excludes are appended
//! in every mode.

use crate::domain::value_objects::{load_pattern_file, ExcludeError, ExcludeList};

use super::options::SyncOptions;

/// Built-in patterns for build output, caches and secrets.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "node_modules/",
    ".venv/",
    "venv/",
    "__pycache__/",
    "*.pyc",
    "target/",
    ".next/",
    ".cache/",
    ".DS_Store",
    "*.log",
    ".env",
    ".env.*",
];

/// Defaults retracted by `include_env`.
pub const ENV_EXCLUDES: &[&str] = &[".env", ".env.*"];

/// Pattern injected by `no_git`.
pub const GIT_EXCLUDE: &str = ".git/";

/// Always applied: repository content arrives by clone, never by copy.
pub const FORCE_EXCLUDES: &[&str] = &["/repos/"];

/// Compute the effective exclude list for one sync.
///
/// The only failure is an unreadable pattern file, reported before any remote
/// interaction.
pub fn resolve_excludes(options: &SyncOptions) -> Result<ExcludeList, ExcludeError> {
    let mut explicit: Vec<String> = options.excludes.clone();
    if let Some(path) = &options.exclude_file {
        explicit.extend(load_pattern_file(path)?);
    }

    let mut list = ExcludeList::new();
    if options.only_explicit_excludes {
        list.extend(&explicit);
    } else {
        let mut defaults: ExcludeList = DEFAULT_EXCLUDES.iter().collect();
        for pattern in &options.workspace_remove {
            defaults.remove(pattern);
        }
        if options.include_env {
            for pattern in ENV_EXCLUDES {
                defaults.remove(pattern);
            }
        }

        list.extend(defaults.iter());
        list.extend(&options.workspace_add);
        list.extend(&explicit);
        if options.no_git {
            list.push(GIT_EXCLUDE);
        }
    }

    list.extend(FORCE_EXCLUDES);
    Ok(list)
}
