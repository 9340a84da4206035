//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod git_inspector;
pub mod remote_shell;
pub mod transport;

pub use git_inspector::GitInspector;
pub use remote_shell::{RemoteError, RemoteShell, ScriptOutput};
pub use transport::{TransferError, TransferRequest, Transport};
