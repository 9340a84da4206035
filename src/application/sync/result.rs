//! Sync Result
//!
//! The structured report of one sync invocation, and the aggregator that
//! assembles it stage by stage.

use std::fmt;
use std::time::Instant;

use serde::Serialize;

use crate::domain::value_objects::ExcludeList;

/// Skip message for a repository without a usable remote URL
pub const MISSING_REMOTE: &str = "missing remote";

/// Top-level action classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTaken {
    /// Remote path existed and force was not set; nothing ran
    Skipped,
    /// Stopped before mutating the remote
    DryRun,
    /// Remote path was absent and has been populated
    Synced,
    /// Remote path existed and was overwritten because force was set
    ForcedSync,
}

impl ActionTaken {
    /// Classify from the existence check and the relevant flags.
    pub fn classify(remote_exists: bool, force: bool, dry_run: bool) -> Self {
        if remote_exists && !force {
            Self::Skipped
        } else if dry_run {
            Self::DryRun
        } else if remote_exists {
            Self::ForcedSync
        } else {
            Self::Synced
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::DryRun => "dry_run",
            Self::Synced => "synced",
            Self::ForcedSync => "forced_sync",
        }
    }
}

impl fmt::Display for ActionTaken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoStatus {
    Cloned,
    Skipped,
}

/// Outcome for one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoResult {
    pub name: String,
    pub path: String,
    pub remote: Option<String>,
    pub status: RepoStatus,
    /// Why the repository was skipped
    pub message: Option<String>,
}

impl RepoResult {
    pub fn cloned(name: impl Into<String>, path: impl Into<String>, remote: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            remote: Some(remote.into()),
            status: RepoStatus::Cloned,
            message: None,
        }
    }

    pub fn skipped(
        name: impl Into<String>,
        path: impl Into<String>,
        remote: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            remote,
            status: RepoStatus::Skipped,
            message: Some(message.into()),
        }
    }

    pub fn is_cloned(&self) -> bool {
        self.status == RepoStatus::Cloned
    }
}

/// Result of a sync operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncResult {
    /// Whether the destination existed before this run
    pub remote_exists: bool,
    /// None when the run failed before it could be classified
    pub action_taken: Option<ActionTaken>,
    pub duration_ms: u64,
    /// Top-level error, if any stage failed fatally
    pub error: Option<String>,
    /// Exclude patterns in effect (or that would have been in effect)
    pub excludes: ExcludeList,
    pub repo_results: Vec<RepoResult>,
    /// Transport that completed the copy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,
    /// Dry-run only: local files the transfer would send
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_files: Option<u64>,
}

impl SyncResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_skipped(&self) -> bool {
        self.action_taken == Some(ActionTaken::Skipped)
    }

    pub fn cloned_count(&self) -> usize {
        self.repo_results.iter().filter(|r| r.is_cloned()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.repo_results.len() - self.cloned_count()
    }
}

/// Collects stage outcomes into a [`SyncResult`].
///
/// Timing starts when the aggregator is created, so create it first.
#[derive(Debug)]
pub struct ResultAggregator {
    started: Instant,
    excludes: ExcludeList,
    remote_exists: bool,
    action: Option<ActionTaken>,
    error: Option<String>,
    repo_results: Vec<RepoResult>,
    transport: Option<String>,
    planned_files: Option<u64>,
}

impl ResultAggregator {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            excludes: ExcludeList::new(),
            remote_exists: false,
            action: None,
            error: None,
            repo_results: Vec::new(),
            transport: None,
            planned_files: None,
        }
    }

    pub fn excludes(&mut self, excludes: ExcludeList) {
        self.excludes = excludes;
    }

    /// Record the existence check and classify the run.
    pub fn existence(&mut self, remote_exists: bool, force: bool, dry_run: bool) -> ActionTaken {
        let action = ActionTaken::classify(remote_exists, force, dry_run);
        self.remote_exists = remote_exists;
        self.action = Some(action);
        action
    }

    pub fn transport(&mut self, name: &str) {
        self.transport = Some(name.to_string());
    }

    pub fn planned_files(&mut self, count: u64) {
        self.planned_files = Some(count);
    }

    pub fn repos(&mut self, results: impl IntoIterator<Item = RepoResult>) {
        self.repo_results.extend(results);
    }

    /// Record a fatal error. The first error wins.
    pub fn fail(&mut self, error: impl fmt::Display) {
        if self.error.is_none() {
            self.error = Some(error.to_string());
        }
    }

    pub fn finish(self) -> SyncResult {
        SyncResult {
            remote_exists: self.remote_exists,
            action_taken: self.action,
            duration_ms: self.started.elapsed().as_millis() as u64,
            error: self.error,
            excludes: self.excludes,
            repo_results: self.repo_results,
            transport: self.transport,
            planned_files: self.planned_files,
        }
    }
}
