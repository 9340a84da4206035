//! Hoist - materialize local workspaces on remote hosts
//!
//! Hoist copies a workspace directory to a remote server in one bulk transfer
//! (rsync, falling back to tar over ssh), then re-creates the workspace's git
//! repositories there by cloning them from their own remotes instead of
//! shipping their history.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{
    resolve_excludes, ActionTaken, RepoResult, RepoStatus, SyncOptions, SyncRequest, SyncResult,
    SyncUseCase,
};
pub use config::Config;
pub use domain::entities::{Server, Workspace};
pub use error::{HoistError, HoistResult};
