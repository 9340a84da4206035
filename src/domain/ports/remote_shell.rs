//! Remote Shell Port
//!
//! The remote-side commands the sync pipeline issues. The SSH implementation
//! lives in infrastructure; tests substitute an in-memory fake.

use thiserror::Error;

use crate::domain::value_objects::RemotePath;

/// Error talking to the remote host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Could not reach or authenticate with the host
    #[error("cannot reach '{host}': {message}")]
    Connection { host: String, message: String },

    /// A remote command exited with an unexpected status
    #[error("remote command `{command}` on '{host}' failed (exit code {code:?}): {stderr}")]
    CommandFailed {
        host: String,
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// A remote command did not finish before its deadline
    #[error("remote command `{command}` on '{host}' timed out after {secs}s")]
    TimedOut {
        host: String,
        command: String,
        secs: u64,
    },
}

/// Combined output of a script run through a remote shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptOutput {
    /// Exit code of the remote shell (None when killed by a signal)
    pub code: Option<i32>,
    /// stdout followed by stderr, as much as arrived
    pub output: String,
    /// Set when the session itself dropped or hit its deadline
    pub interrupted: Option<RemoteError>,
}

impl ScriptOutput {
    pub fn success(&self) -> bool {
        self.interrupted.is_none() && self.code == Some(0)
    }
}

/// Commands executed on one remote host.
pub trait RemoteShell {
    fn host(&self) -> &str;

    /// Test for existence of a path.
    ///
    /// `Ok(false)` only when the host answered that the path is absent;
    /// connection and authorization failures are errors.
    fn exists(&self, path: &RemotePath) -> Result<bool, RemoteError>;

    /// `mkdir -p` the path.
    fn create_dir(&self, path: &RemotePath) -> Result<(), RemoteError>;

    /// Atomically create a lock directory. `Ok(false)` when it already exists.
    fn try_lock(&self, lock: &RemotePath) -> Result<bool, RemoteError>;

    fn unlock(&self, lock: &RemotePath) -> Result<(), RemoteError>;

    /// Feed `script` to `sh -s` in a single session.
    ///
    /// A non-zero exit, a dropped session or a deadline is returned as `Ok`
    /// so callers can inspect partial output; only failures to start the
    /// session at all are errors.
    fn run_script(&self, script: &str) -> Result<ScriptOutput, RemoteError>;
}
