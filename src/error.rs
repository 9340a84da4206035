//! Error types for Hoist
//!
//! Uses `thiserror` for library errors. Errors scoped to one layer live next to
//! that layer and convert into `HoistError` at the use-case boundary.

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::ports::{RemoteError, TransferError};
use crate::domain::value_objects::{ExcludeError, SlugError};
use crate::infrastructure::workspace::WorkspaceError;

/// Result type alias for Hoist operations
pub type HoistResult<T> = Result<T, HoistError>;

/// Main error type for Hoist operations
#[derive(Error, Debug)]
pub enum HoistError {
    /// Exclude pattern file missing, unreadable or malformed
    #[error(transparent)]
    Exclude(#[from] ExcludeError),

    /// Workspace slug cannot be used as a remote directory name
    #[error(transparent)]
    Slug(#[from] SlugError),

    /// Workspace descriptor could not be loaded
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Remote command failed (connectivity, authorization, non-zero exit)
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Both transports failed to copy the tree
    #[error(transparent)]
    Transfer(#[from] TransferError),

    /// Another sync holds the lock for this destination
    #[error("remote path '{path}' is locked by another sync (remove '{lock}' if stale)")]
    RemoteLocked { path: String, lock: String },

    /// The remote clone script exited non-zero
    #[error("clone script failed with exit code {code:?}")]
    CloneScript { code: Option<i32>, output: String },
}
