//! Workspace descriptor loading
//!
//! Reads `workspace.json` from a workspace directory. The slug defaults to the
//! directory name when the descriptor leaves it out.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::Workspace;

/// Descriptor file name inside a workspace directory
pub const DESCRIPTOR_FILE: &str = "workspace.json";

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("workspace directory not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid workspace descriptor {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the descriptor for `dir`.
///
/// A directory without `workspace.json` is a workspace with no repositories.
pub fn load_workspace(dir: &Path) -> Result<Workspace, WorkspaceError> {
    if !dir.is_dir() {
        return Err(WorkspaceError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    let path = dir.join(DESCRIPTOR_FILE);
    let mut workspace = match fs::read_to_string(&path) {
        Ok(content) => serde_json::from_str::<Workspace>(&content)
            .map_err(|source| WorkspaceError::Parse { path, source })?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Workspace::default(),
        Err(source) => return Err(WorkspaceError::Io { path, source }),
    };

    if workspace.slug.trim().is_empty() {
        workspace.slug = dir_name(dir);
    }
    Ok(workspace)
}

fn dir_name(dir: &Path) -> String {
    let resolved = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
