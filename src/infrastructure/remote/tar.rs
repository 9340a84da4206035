//! Tar Pipe Transport
//!
//! Streams a filtered archive of the local tree into a remote `tar -x`:
//! `tar -cf - . | ssh host 'mkdir -p D && tar -xf - -C D'`. Both ends run
//! concurrently and both exit codes are checked. Always a full copy.

use std::process::Command;
use std::time::Duration;

use crate::domain::ports::{TransferError, TransferRequest, Transport};
use crate::infrastructure::process;

use super::rsync::process_error;
use super::ssh::SshOptions;

const NAME: &str = "tar";

pub struct TarPipeTransport {
    ssh: SshOptions,
    timeout: Option<Duration>,
}

impl TarPipeTransport {
    pub fn new(ssh: SshOptions, timeout: Option<Duration>) -> Self {
        Self { ssh, timeout }
    }

    fn archive_command(request: &TransferRequest<'_>) -> Command {
        let mut cmd = Command::new(NAME);
        cmd.arg("-C")
            .arg(request.local_root)
            .arg("-cf")
            .arg("-")
            // excludes must precede the member operand
            .args(request.excludes.tar_args())
            .arg(".");
        cmd
    }

    fn extract_command(&self, request: &TransferRequest<'_>) -> Command {
        let dest = request.destination.shell();
        self.ssh.command(
            request.host,
            &format!("mkdir -p {dest} && tar -xf - -C {dest}"),
        )
    }
}

impl Transport for TarPipeTransport {
    fn name(&self) -> &'static str {
        NAME
    }

    fn is_available(&self) -> bool {
        process::is_installed(NAME)
    }

    fn transfer(&self, request: &TransferRequest<'_>) -> Result<&'static str, TransferError> {
        let (archive, extract) = process::run_pipe(
            Self::archive_command(request),
            self.extract_command(request),
            self.timeout,
        )
        .map_err(|e| process_error(NAME, e))?;

        if archive.success() && extract.success() {
            return Ok(NAME);
        }

        let code = if archive.success() {
            extract.code
        } else {
            archive.code
        };
        let stderr = [archive.stderr.trim(), extract.stderr.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("; ");
        Err(TransferError::Failed {
            transport: NAME,
            code,
            stderr,
        })
    }
}
