//! SSH Remote Shell
//!
//! Implements the `RemoteShell` port with one `ssh` invocation per command.
//! Exit code 255 is ssh's own failure (unreachable host, rejected key) and is
//! always reported as a connection error. The clone session keeps whatever it
//! printed before the connection dropped.

use std::ffi::{OsStr, OsString};
use std::process::Command;
use std::time::Duration;

use tracing::debug;

use crate::domain::ports::{RemoteError, RemoteShell, ScriptOutput};
use crate::domain::value_objects::RemotePath;
use crate::infrastructure::process::{self, CommandOutput, ProcessError};

/// Exit code ssh uses for its own errors
const SSH_FAILURE: i32 = 255;

const SCRIPT_COMMAND: &str = "sh -s";

/// Options shared by every ssh invocation, including the ones rsync and the
/// tar pipe make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshOptions {
    /// Seconds; 0 leaves ssh's default
    pub connect_timeout: u64,
    /// Never prompt for passwords or host keys
    pub batch_mode: bool,
}

impl Default for SshOptions {
    fn default() -> Self {
        Self {
            connect_timeout: 10,
            batch_mode: true,
        }
    }
}

impl SshOptions {
    /// `-o` arguments for the ssh command line.
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.connect_timeout > 0 {
            args.push("-o".to_string());
            args.push(format!("ConnectTimeout={}", self.connect_timeout));
        }
        if self.batch_mode {
            args.push("-o".to_string());
            args.push("BatchMode=yes".to_string());
        }
        args
    }

    /// `ssh <args>` as a single string, for rsync's `-e`.
    pub fn rsync_shell(&self) -> String {
        std::iter::once("ssh".to_string())
            .chain(self.args())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// `ssh <args> -- <host> <remote_command>`
    pub fn command(&self, host: &str, remote_command: &str) -> Command {
        self.command_with(OsStr::new("ssh"), host, remote_command)
    }

    fn command_with(&self, program: &OsStr, host: &str, remote_command: &str) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(self.args()).arg("--").arg(host).arg(remote_command);
        cmd
    }
}

/// Remote shell over ssh
pub struct SshShell {
    program: OsString,
    host: String,
    options: SshOptions,
    /// Deadline for short commands (existence check, mkdir, lock)
    check_timeout: Option<Duration>,
    /// Deadline for the clone script
    script_timeout: Option<Duration>,
}

impl SshShell {
    pub fn new(host: impl Into<String>, options: SshOptions) -> Self {
        Self {
            program: OsString::from("ssh"),
            host: host.into(),
            options,
            check_timeout: None,
            script_timeout: None,
        }
    }

    pub fn with_timeouts(mut self, check: Option<Duration>, script: Option<Duration>) -> Self {
        self.check_timeout = check;
        self.script_timeout = script;
        self
    }

    #[cfg(test)]
    fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    fn spawn(
        &self,
        remote_command: &str,
        stdin: Option<&[u8]>,
        timeout: Option<Duration>,
    ) -> Result<CommandOutput, ProcessError> {
        let cmd = self.options.command_with(&self.program, &self.host, remote_command);
        process::run(cmd, stdin, timeout)
    }

    fn exec(&self, remote_command: &str, timeout: Option<Duration>) -> Result<CommandOutput, RemoteError> {
        let output = self
            .spawn(remote_command, None, timeout)
            .map_err(|e| self.process_error(remote_command, e))?;
        if output.code == Some(SSH_FAILURE) {
            return Err(self.connection_error(&output.stderr));
        }
        Ok(output)
    }

    fn connection_error(&self, stderr: &str) -> RemoteError {
        RemoteError::Connection {
            host: self.host.clone(),
            message: last_message(stderr),
        }
    }

    /// Run a short command; `expected` exit codes map to their index.
    fn check(&self, remote_command: &str, expected: &[i32]) -> Result<usize, RemoteError> {
        let output = self.exec(remote_command, self.check_timeout)?;
        output
            .code
            .and_then(|code| expected.iter().position(|e| *e == code))
            .ok_or_else(|| RemoteError::CommandFailed {
                host: self.host.clone(),
                command: remote_command.to_string(),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            })
    }

    fn process_error(&self, remote_command: &str, error: ProcessError) -> RemoteError {
        match error {
            ProcessError::TimedOut { secs, .. } => RemoteError::TimedOut {
                host: self.host.clone(),
                command: remote_command.to_string(),
                secs,
            },
            other => RemoteError::Connection {
                host: self.host.clone(),
                message: other.to_string(),
            },
        }
    }
}

fn last_message(stderr: &str) -> String {
    let line = stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("");
    if line.is_empty() {
        "ssh exited with status 255".to_string()
    } else {
        line.trim().to_string()
    }
}

impl RemoteShell for SshShell {
    fn host(&self) -> &str {
        &self.host
    }

    fn exists(&self, path: &RemotePath) -> Result<bool, RemoteError> {
        let exists = self.check(&format!("test -e {}", path.shell()), &[0, 1])? == 0;
        debug!(%path, exists, "remote existence check");
        Ok(exists)
    }

    fn create_dir(&self, path: &RemotePath) -> Result<(), RemoteError> {
        self.check(&format!("mkdir -p {}", path.shell()), &[0])?;
        Ok(())
    }

    fn try_lock(&self, lock: &RemotePath) -> Result<bool, RemoteError> {
        let l = lock.shell();
        let command = format!(
            "mkdir -p \"$(dirname -- {l})\" && mkdir {l} 2>/dev/null && exit 0; [ -d {l} ] && exit 1; exit 2"
        );
        Ok(self.check(&command, &[0, 1])? == 0)
    }

    fn unlock(&self, lock: &RemotePath) -> Result<(), RemoteError> {
        self.check(&format!("rmdir {}", lock.shell()), &[0])?;
        Ok(())
    }

    fn run_script(&self, script: &str) -> Result<ScriptOutput, RemoteError> {
        match self.spawn(SCRIPT_COMMAND, Some(script.as_bytes()), self.script_timeout) {
            Ok(output) => Ok(ScriptOutput {
                code: output.code,
                interrupted: (output.code == Some(SSH_FAILURE))
                    .then(|| self.connection_error(&output.stderr)),
                output: output.combined(),
            }),
            Err(ProcessError::TimedOut { secs, output, .. }) => Ok(ScriptOutput {
                code: None,
                output,
                interrupted: Some(RemoteError::TimedOut {
                    host: self.host.clone(),
                    command: SCRIPT_COMMAND.to_string(),
                    secs,
                }),
            }),
            Err(e) => Err(self.process_error(SCRIPT_COMMAND, e)),
        }
    }
}
