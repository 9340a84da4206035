//! Transport Port
//!
//! A mechanism that copies a local tree, minus excluded paths, into an
//! existing remote directory.

use std::path::Path;

use thiserror::Error;

use crate::domain::value_objects::{ExcludeList, RemotePath};

/// Error from a single transport attempt
#[derive(Debug, Clone, Error)]
pub enum TransferError {
    /// The transport's local tooling is missing
    #[error("{transport} is not available")]
    Unavailable { transport: &'static str },

    #[error("{transport} failed (exit code {code:?}): {stderr}")]
    Failed {
        transport: &'static str,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{transport} timed out after {secs}s")]
    TimedOut { transport: &'static str, secs: u64 },

    #[error("{transport}: {message}")]
    Io {
        transport: &'static str,
        message: String,
    },

    /// Primary and fallback both failed
    #[error("all transports failed: {primary}; {fallback}")]
    AllFailed {
        primary: Box<TransferError>,
        fallback: Box<TransferError>,
    },
}

/// Everything a transport needs for one copy.
#[derive(Debug, Clone, Copy)]
pub struct TransferRequest<'a> {
    pub local_root: &'a Path,
    pub host: &'a str,
    pub destination: &'a RemotePath,
    pub excludes: &'a ExcludeList,
}

/// Strategy for copying a tree to a remote host
pub trait Transport: Send + Sync {
    /// Name of this transfer method (for logging and reporting)
    fn name(&self) -> &'static str;

    /// Check if this transfer method is available on the system
    fn is_available(&self) -> bool;

    /// Copy `request.local_root` into `request.destination`.
    ///
    /// Returns the name of the transport that completed the copy.
    fn transfer(&self, request: &TransferRequest<'_>) -> Result<&'static str, TransferError>;
}
