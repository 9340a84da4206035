//! Rsync Transport
//!
//! Incremental copy that preserves permissions and timestamps and keeps
//! partially transferred files for the next attempt. This is the primary
//! transport.

use std::process::Command;
use std::time::Duration;

use crate::domain::ports::{TransferError, TransferRequest, Transport};
use crate::infrastructure::process::{self, ProcessError};

use super::ssh::SshOptions;

const NAME: &str = "rsync";

pub struct RsyncTransport {
    ssh: SshOptions,
    timeout: Option<Duration>,
}

impl RsyncTransport {
    pub fn new(ssh: SshOptions, timeout: Option<Duration>) -> Self {
        Self { ssh, timeout }
    }

    /// Check if rsync is installed and available
    pub fn check_available() -> bool {
        process::is_installed(NAME)
    }

    fn command(&self, request: &TransferRequest<'_>) -> Command {
        let mut cmd = Command::new(NAME);
        cmd.arg("-a")
            .arg("--partial")
            // remote path reaches rsync verbatim, not split by the remote shell
            .arg("--protect-args")
            .arg("-e")
            .arg(self.ssh.rsync_shell())
            .args(request.excludes.rsync_args())
            // trailing slash = copy contents
            .arg(format!("{}/", request.local_root.display()))
            .arg(format!(
                "{}:{}/",
                request.host,
                request.destination.rsync_target()
            ));
        cmd
    }
}

impl Transport for RsyncTransport {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_available(&self) -> bool {
        Self::check_available()
    }

    fn transfer(&self, request: &TransferRequest<'_>) -> Result<&'static str, TransferError> {
        let output = process::run(self.command(request), None, self.timeout)
            .map_err(|e| process_error(NAME, e))?;

        if !output.success() {
            return Err(TransferError::Failed {
                transport: NAME,
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(NAME)
    }
}

/// Map a process failure to the transfer taxonomy.
pub(super) fn process_error(transport: &'static str, error: ProcessError) -> TransferError {
    match error {
        ProcessError::NotFound { .. } => TransferError::Unavailable { transport },
        ProcessError::TimedOut { secs, .. } => TransferError::TimedOut { transport, secs },
        other => TransferError::Io {
            transport,
            message: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ExcludeList, RemotePath};
    use std::path::Path;

    #[test]
    fn rsync_transport_name() {
        let transport = RsyncTransport::new(SshOptions::default(), None);
        assert_eq!(transport.name(), "rsync");
    }

    #[test]
    fn command_copies_contents_with_excludes() {
        let transport = RsyncTransport::new(SshOptions::default(), None);
        let excludes: ExcludeList = ["node_modules/", "*.log", "/repos/"].into_iter().collect();
        let destination = RemotePath::new("~/ws/acme");
        let cmd = transport.command(&TransferRequest {
            local_root: Path::new("/home/me/acme"),
            host: "devbox",
            destination: &destination,
            excludes: &excludes,
        });

        let args: Vec<_> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            [
                "-a",
                "--partial",
                "--protect-args",
                "-e",
                "ssh -o ConnectTimeout=10 -o BatchMode=yes",
                "--exclude=node_modules/",
                "--exclude=*.log",
                "--exclude=/repos/",
                "/home/me/acme/",
                "devbox:ws/acme/",
            ]
        );
    }

    #[test]
    fn remote_path_with_spaces_stays_one_argument() {
        let transport = RsyncTransport::new(SshOptions::default(), None);
        let excludes = ExcludeList::new();
        let destination = RemotePath::new("~/my ws/acme");
        let cmd = transport.command(&TransferRequest {
            local_root: Path::new("/home/me/acme"),
            host: "devbox",
            destination: &destination,
            excludes: &excludes,
        });

        let args: Vec<_> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert!(args.contains(&"--protect-args".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("devbox:my ws/acme/"));
    }

    #[test]
    fn missing_binary_is_unavailable() {
        let err = process_error(
            NAME,
            ProcessError::NotFound {
                program: "rsync".into(),
            },
        );
        assert!(matches!(err, TransferError::Unavailable { transport: "rsync" }));
    }

    #[test]
    fn check_available_does_not_panic() {
        let _ = RsyncTransport::check_available();
    }
}
