//! Workspace descriptor
//!
//! The subset of the workspace metadata this engine consumes: the slug, the
//! repositories living under the workspace, and per-workspace sync preferences.

use serde::{Deserialize, Serialize};

/// Conventional subdirectory holding a workspace's repositories.
pub const REPOS_DIR: &str = "repos";

/// A workspace as described by its `workspace.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    /// Remote leaf directory name; the loader defaults it to the directory name
    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub repos: Vec<RepoEntry>,

    #[serde(default)]
    pub sync: SyncPreferences,
}

/// One repository inside a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEntry {
    pub name: String,

    /// Workspace-relative path (unvalidated as read from disk)
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
}

impl RepoEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            remote: None,
        }
    }

    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = Some(remote.into());
        self
    }

    /// Recorded remote URL; blank strings count as absent.
    pub fn remote(&self) -> Option<&str> {
        self.remote
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}

/// Workspace-level sync preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPreferences {
    /// Patterns added on top of the built-in defaults
    #[serde(default)]
    pub exclude_add: Vec<String>,

    /// Built-in default patterns to drop
    #[serde(default)]
    pub exclude_remove: Vec<String>,

    /// Transfer `.env` files
    #[serde(default)]
    pub include_env: bool,
}
