//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `process` - Deadline-bounded child processes
//! - `remote/` - ssh shell, rsync and tar-pipe transports, fallback
//! - `git` - Local repository inspection (libgit2)
//! - `workspace` - `workspace.json` loading

pub mod git;
pub mod process;
pub mod remote;
pub mod workspace;

// Re-export for convenience
pub use git::Git2Inspector;
pub use remote::{
    DefaultTransport, FallbackTransport, RsyncTransport, SshOptions, SshShell, TarPipeTransport,
};
pub use workspace::{load_workspace, WorkspaceError};
