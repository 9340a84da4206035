//! Common test utilities for Hoist CLI tests.
//!
//! `TestEnv` gives each test its own workspace, config home and a directory
//! of stand-in executables that is searched before the real `PATH`.

#![allow(dead_code)]

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running a Hoist CLI command
#[derive(Debug)]
pub struct TestResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({}):\n{}", e, self.stdout))
    }
}

/// Isolated test environment with temp directories.
pub struct TestEnv {
    /// Workspace directory the CLI runs in
    pub workspace: TempDir,
    /// Stands in for HOME and XDG_CONFIG_HOME
    pub home: TempDir,
    /// Fake executables, first on PATH
    pub bin: TempDir,
    /// Plays the remote host's filesystem
    pub remote: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            workspace: TempDir::new().unwrap(),
            home: TempDir::new().unwrap(),
            bin: TempDir::new().unwrap(),
            remote: TempDir::new().unwrap(),
        }
    }

    pub fn workspace_path(&self, relative: &str) -> PathBuf {
        self.workspace.path().join(relative)
    }

    pub fn remote_path(&self, relative: &str) -> PathBuf {
        self.remote.path().join(relative)
    }

    /// `fakehost:<remote tempdir>`, usable as an ad-hoc server argument
    pub fn server_spec(&self) -> String {
        format!("fakehost:{}", self.remote.path().display())
    }

    pub fn write_workspace_file(&self, relative: &str, content: &str) {
        let path = self.workspace_path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Install an executable shell script under `bin/`.
    #[cfg(unix)]
    pub fn fake_bin(&self, name: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let path = self.bin.path().join(name);
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// ssh stand-in: drops `-o` options, `--` and the host, then runs the
    /// remote command locally.
    #[cfg(unix)]
    pub fn install_fake_ssh(&self) {
        self.install_fake_ssh_with("");
    }

    /// Like `install_fake_ssh`, with `hook` run first; the remote command is
    /// in `$*`.
    #[cfg(unix)]
    pub fn install_fake_ssh_with(&self, hook: &str) {
        self.fake_bin(
            "ssh",
            &format!(
                r#"#!/bin/sh
while [ $# -gt 0 ]; do
  case "$1" in
    -o) shift 2 ;;
    --) shift; break ;;
    -*) shift ;;
    *) break ;;
  esac
done
shift
{hook}
exec sh -c "$*"
"#
            ),
        );
    }

    /// ssh whose clone session runs, then loses the connection
    #[cfg(unix)]
    pub fn install_ssh_dropping_clone_session(&self) {
        self.install_fake_ssh_with(
            r#"if [ "$*" = "sh -s" ]; then
  sh -s
  echo 'Connection to fakehost closed by remote host.' >&2
  exit 255
fi"#,
        );
    }

    /// ssh stand-in for an unreachable host
    #[cfg(unix)]
    pub fn install_unreachable_ssh(&self) {
        self.fake_bin(
            "ssh",
            "#!/bin/sh\necho 'ssh: connect to host fakehost port 22: Connection refused' >&2\nexit 255\n",
        );
    }

    /// rsync that is not usable, so the tar pipe has to take over
    #[cfg(unix)]
    pub fn install_broken_rsync(&self) {
        self.fake_bin("rsync", "#!/bin/sh\necho 'rsync: not here' >&2\nexit 127\n");
    }

    /// git whose `clone` just creates the destination directory
    #[cfg(unix)]
    pub fn install_fake_git(&self) {
        self.fake_bin(
            "git",
            "#!/bin/sh\nfor last in \"$@\"; do :; done\nmkdir -p \"$last\"\n",
        );
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut path = OsString::from(self.bin.path());
        if let Some(original) = std::env::var_os("PATH") {
            path.push(":");
            path.push(original);
        }

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_hoist"));
        cmd.current_dir(self.workspace.path())
            .args(args)
            .env("PATH", path)
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path())
            .env_remove("RUST_LOG");
        for var in [
            "HOIST_REMOTE_LOCK",
            "HOIST_TRANSFER_TIMEOUT",
            "HOIST_CLONE_TIMEOUT",
            "HOIST_CHECK_TIMEOUT",
        ] {
            cmd.env_remove(var);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("failed to execute hoist");
        TestResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Write the user config file (`$XDG_CONFIG_HOME/hoist/config.toml`).
pub fn write_user_config(home: &Path, content: &str) {
    let dir = home.join("hoist");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), content).unwrap();
}
