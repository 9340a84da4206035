//! Batch sync types
//!
//! A batch is several workspaces synced to one server in sequence. Each
//! workspace yields either a `SyncResult` or the error that stopped it before
//! the remote was contacted.

use std::path::PathBuf;

use crate::domain::entities::Workspace;
use crate::error::{HoistError, HoistResult};

use super::result::SyncResult;

/// One workspace to sync, as loaded by the caller.
#[derive(Debug)]
pub struct BatchTarget {
    pub dir: PathBuf,
    /// Loading the descriptor may already have failed
    pub workspace: HoistResult<Workspace>,
}

impl BatchTarget {
    pub fn new(dir: impl Into<PathBuf>, workspace: HoistResult<Workspace>) -> Self {
        Self {
            dir: dir.into(),
            workspace,
        }
    }

    /// Slug when known, otherwise the directory name.
    pub fn label(&self) -> String {
        match &self.workspace {
            Ok(ws) if !ws.slug.is_empty() => ws.slug.clone(),
            _ => self
                .dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.dir.display().to_string()),
        }
    }
}

#[derive(Debug)]
pub struct BatchEntry {
    pub slug: String,
    pub outcome: Result<SyncResult, HoistError>,
}

impl BatchEntry {
    /// True when the workspace did not complete cleanly.
    pub fn is_failure(&self) -> bool {
        match &self.outcome {
            Ok(result) => !result.is_success(),
            Err(_) => true,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(&self.outcome, Ok(result) if result.is_skipped())
    }
}
