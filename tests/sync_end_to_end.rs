//! End-to-end `hoist sync` runs against a fake remote.
//!
//! The "remote" is a temp directory reached through a stand-in `ssh` that
//! executes commands locally. rsync is made unavailable so the tar pipe
//! carries the transfer, and `git clone` is replaced by a stub.

#![cfg(unix)]

mod common;

use std::fs;

use common::{write_user_config, TestEnv};

const WORKSPACE_JSON: &str = r#"{
  "slug": "acme",
  "repos": [
    {"name": "frontend", "path": "repos/frontend", "remote": "git@example.com:acme/frontend.git"},
    {"name": "backend", "path": "repos/backend"}
  ]
}"#;

fn fake_remote_env() -> TestEnv {
    let env = TestEnv::new();
    env.install_fake_ssh();
    env.install_broken_rsync();
    env.install_fake_git();

    env.write_workspace_file("workspace.json", WORKSPACE_JSON);
    env.write_workspace_file("notes.md", "# notes\n");
    env.write_workspace_file("src/main.txt", "hello\n");
    env.write_workspace_file("node_modules/pkg/index.js", "ignored\n");
    env.write_workspace_file(".env", "SECRET=1\n");
    env.write_workspace_file("repos/frontend/README.md", "local checkout\n");
    env
}

#[test]
fn test_sync_transfers_tree_and_clones_repos() {
    let env = fake_remote_env();
    let server = env.server_spec();

    let result = env.run(&["--json", "sync", &server]);
    assert_eq!(result.exit_code, 0, "stderr:\n{}", result.stderr);

    let json = result.json();
    assert_eq!(json["action_taken"], "synced");
    assert_eq!(json["remote_exists"], false);
    assert_eq!(json["transport"], "tar");
    assert!(json["error"].is_null());

    let repos = json["repo_results"].as_array().unwrap();
    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0]["name"], "frontend");
    assert_eq!(repos[0]["status"], "cloned");
    assert_eq!(repos[1]["name"], "backend");
    assert_eq!(repos[1]["status"], "skipped");
    assert_eq!(repos[1]["message"], "missing remote");

    let dest = env.remote_path("acme");
    assert_eq!(fs::read_to_string(dest.join("notes.md")).unwrap(), "# notes\n");
    assert!(dest.join("src/main.txt").is_file());
    assert!(!dest.join("node_modules/pkg/index.js").exists());
    assert!(!dest.join(".env").exists());
    // Cloned by the stub, not copied from the local checkout
    assert!(dest.join("repos/frontend").is_dir());
    assert!(!dest.join("repos/frontend/README.md").exists());
    // Lock released
    assert!(!env.remote_path(".acme.hoist-lock").exists());
}

#[test]
fn test_second_sync_is_skipped_with_exit_code_3() {
    let env = fake_remote_env();
    let server = env.server_spec();

    assert_eq!(env.run(&["sync", &server]).exit_code, 0);

    let result = env.run(&["sync", &server]);
    assert_eq!(result.exit_code, 3, "stderr:\n{}", result.stderr);
    assert!(result.stdout.starts_with("Action: skipped\nRemote existed: yes\n"));
}

#[test]
fn test_force_resyncs_existing_remote() {
    let env = fake_remote_env();
    let server = env.server_spec();
    assert_eq!(env.run(&["sync", &server]).exit_code, 0);

    env.write_workspace_file("later.txt", "added after first sync\n");
    let result = env.run(&["--json", "sync", &server, "--force"]);
    assert_eq!(result.exit_code, 0, "stderr:\n{}", result.stderr);

    let json = result.json();
    assert_eq!(json["action_taken"], "forced_sync");
    assert_eq!(json["repo_results"][0]["status"], "skipped");
    assert_eq!(json["repo_results"][0]["message"], "exists");
    assert!(env.remote_path("acme/later.txt").is_file());
}

#[test]
fn test_dry_run_reports_without_touching_remote() {
    let env = fake_remote_env();
    let server = env.server_spec();

    let result = env.run(&["--json", "sync", &server, "--dry-run"]);
    assert_eq!(result.exit_code, 0, "stderr:\n{}", result.stderr);

    let json = result.json();
    assert_eq!(json["action_taken"], "dry_run");
    // workspace.json, notes.md, src/main.txt
    assert_eq!(json["planned_files"], 3);
    assert!(json["repo_results"].as_array().unwrap().is_empty());
    assert!(!env.remote_path("acme").exists());
}

#[test]
fn test_include_env_transfers_env_files() {
    let env = fake_remote_env();
    let server = env.server_spec();

    let result = env.run(&["sync", &server, "--include-env"]);
    assert_eq!(result.exit_code, 0, "stderr:\n{}", result.stderr);
    assert!(env.remote_path("acme/.env").is_file());
}

#[test]
fn test_unreachable_host_fails_with_exit_code_1() {
    let env = TestEnv::new();
    env.install_unreachable_ssh();
    env.write_workspace_file("workspace.json", WORKSPACE_JSON);

    let result = env.run(&["--json", "sync", &env.server_spec()]);
    assert_eq!(result.exit_code, 1);

    let json = result.json();
    assert!(json["action_taken"].is_null());
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Connection refused"));
}

#[test]
fn test_failed_existence_check_is_not_absence() {
    let env = fake_remote_env();
    env.install_fake_ssh_with(
        r#"case "$*" in "test -e "*) echo 'sh: test: Permission denied' >&2; exit 126 ;; esac"#,
    );

    let result = env.run(&["--json", "sync", &env.server_spec()]);
    assert_eq!(result.exit_code, 1, "stderr:\n{}", result.stderr);

    let json = result.json();
    assert!(json["action_taken"].is_null());
    assert_eq!(json["remote_exists"], false);
    let error = json["error"].as_str().unwrap();
    assert!(error.contains("exit code Some(126)"), "error: {error}");
    assert!(error.contains("Permission denied"));
    assert!(json["repo_results"].as_array().unwrap().is_empty());
    assert!(!env.remote_path("acme").exists());
    assert!(!env.remote_path(".acme.hoist-lock").exists());
}

#[test]
fn test_dropped_clone_session_reports_clones_already_made() {
    let env = fake_remote_env();
    env.install_ssh_dropping_clone_session();

    let result = env.run(&["--json", "sync", &env.server_spec()]);
    assert_eq!(result.exit_code, 1, "stderr:\n{}", result.stderr);

    let json = result.json();
    assert_eq!(json["action_taken"], "synced");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Connection to fakehost closed by remote host."));

    let repos = json["repo_results"].as_array().unwrap();
    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0]["name"], "frontend");
    assert_eq!(repos[0]["status"], "cloned");
    assert_eq!(repos[1]["name"], "backend");
    assert_eq!(repos[1]["message"], "missing remote");
    assert!(env.remote_path("acme/repos/frontend").is_dir());
    assert!(!env.remote_path(".acme.hoist-lock").exists());
}

#[test]
fn test_held_lock_blocks_sync() {
    let env = fake_remote_env();
    fs::create_dir_all(env.remote_path(".acme.hoist-lock")).unwrap();

    let result = env.run(&["sync", &env.server_spec()]);
    assert_eq!(result.exit_code, 1);
    assert!(result.stdout.contains("locked by another sync"));
    assert!(!env.remote_path("acme").exists());
}

#[test]
fn test_lock_can_be_disabled_from_environment() {
    let env = fake_remote_env();
    fs::create_dir_all(env.remote_path(".acme.hoist-lock")).unwrap();

    let result = env.run_with_env(&["sync", &env.server_spec()], &[("HOIST_REMOTE_LOCK", "false")]);
    assert_eq!(result.exit_code, 0, "stderr:\n{}", result.stderr);
    assert!(env.remote_path("acme/notes.md").is_file());
}

#[test]
fn test_configured_server_and_batch_output() {
    let env = fake_remote_env();
    write_user_config(
        env.home.path(),
        &format!(
            "[servers.box]\nhost = \"fakehost\"\nroot = \"{}\"\n",
            env.remote.path().display()
        ),
    );

    let other = tempfile::tempdir().unwrap();
    fs::write(other.path().join("workspace.json"), r#"{"slug": "other"}"#).unwrap();
    fs::write(other.path().join("a.txt"), "a\n").unwrap();

    let first = env.workspace.path().to_str().unwrap().to_string();
    let second = other.path().to_str().unwrap().to_string();
    let result = env.run(&["--json", "sync", "box", &first, &second]);
    assert_eq!(result.exit_code, 0, "stderr:\n{}", result.stderr);

    let json = result.json();
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["slug"], "acme");
    assert_eq!(results[0]["result"]["action_taken"], "synced");
    assert_eq!(results[1]["slug"], "other");
    assert!(env.remote_path("other/a.txt").is_file());
}

#[test]
fn test_batch_reports_missing_workspace_as_error() {
    let env = fake_remote_env();
    let missing = env.workspace_path("does-not-exist");
    let first = env.workspace.path().to_str().unwrap().to_string();

    let result = env.run(&[
        "--json",
        "sync",
        &env.server_spec(),
        &first,
        missing.to_str().unwrap(),
    ]);
    assert_eq!(result.exit_code, 1);

    let json = result.json();
    assert_eq!(json["results"][0]["result"]["action_taken"], "synced");
    assert_eq!(json["results"][1]["slug"], "does-not-exist");
    assert!(json["results"][1]["error"]
        .as_str()
        .unwrap()
        .contains("workspace directory not found"));
}
