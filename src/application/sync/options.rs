//! Sync Options
//!
//! Immutable configuration for one sync invocation. Built once by the caller
//! (CLI, batch runner, tests) and passed by reference into the use case.

use std::path::PathBuf;

use crate::domain::entities::SyncPreferences;

/// Options for the sync use case
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Sync even if the remote workspace directory already exists
    pub force: bool,
    /// Stop after the existence check; never mutate the remote
    pub dry_run: bool,
    /// Exclude `.git` directories from the bulk transfer
    pub no_git: bool,
    /// Transfer environment files (`.env`, `.env.*`)
    pub include_env: bool,
    /// Extra patterns from the command line
    pub excludes: Vec<String>,
    /// File with extra patterns, one per line
    pub exclude_file: Option<PathBuf>,
    /// Workspace-level patterns added on top of the defaults
    pub workspace_add: Vec<String>,
    /// Workspace-level removals from the built-in defaults
    pub workspace_remove: Vec<String>,
    /// Use only explicit patterns (plus force-excludes); skip defaults and
    /// workspace preferences
    pub only_explicit_excludes: bool,
    /// Serialize syncs of the same destination with a remote lock directory
    pub remote_lock: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncOptions {
    pub fn new() -> Self {
        Self {
            force: false,
            dry_run: false,
            no_git: false,
            include_env: false,
            excludes: Vec::new(),
            exclude_file: None,
            workspace_add: Vec::new(),
            workspace_remove: Vec::new(),
            only_explicit_excludes: false,
            remote_lock: true,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_no_git(mut self, no_git: bool) -> Self {
        self.no_git = no_git;
        self
    }

    pub fn with_include_env(mut self, include_env: bool) -> Self {
        self.include_env = include_env;
        self
    }

    pub fn with_excludes(mut self, patterns: Vec<String>) -> Self {
        self.excludes = patterns;
        self
    }

    pub fn with_exclude_file(mut self, path: Option<PathBuf>) -> Self {
        self.exclude_file = path;
        self
    }

    pub fn with_only_explicit_excludes(mut self, only: bool) -> Self {
        self.only_explicit_excludes = only;
        self
    }

    pub fn with_remote_lock(mut self, enabled: bool) -> Self {
        self.remote_lock = enabled;
        self
    }

    /// Fold in a workspace's preferences. `include_env` is sticky: either the
    /// caller or the workspace can turn it on.
    pub fn with_workspace_preferences(mut self, prefs: &SyncPreferences) -> Self {
        self.workspace_add = prefs.exclude_add.clone();
        self.workspace_remove = prefs.exclude_remove.clone();
        self.include_env |= prefs.include_env;
        self
    }
}
