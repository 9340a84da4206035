//! Output Rendering
//!
//! Text and JSON renderings of sync results. Renderers return strings; the
//! binary decides where they go.

use serde::Serialize;
use serde_json::{json, Value};

use crate::application::{BatchEntry, RepoResult, RepoStatus, SyncResult};
use crate::domain::value_objects::ExcludeList;

/// Exit code when every workspace was skipped because its remote exists
pub const EXIT_REMOTE_EXISTS: u8 = 3;

/// Exit code for any top-level error
pub const EXIT_FAILURE: u8 = 1;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn repo_line(repo: &RepoResult) -> String {
    match repo.status {
        RepoStatus::Cloned => format!("  + {} ({}) cloned", repo.name, repo.path),
        RepoStatus::Skipped => match &repo.message {
            Some(message) => format!("  - {} ({}) skipped: {}", repo.name, repo.path, message),
            None => format!("  - {} ({}) skipped", repo.name, repo.path),
        },
    }
}

/// Render one result as deterministic text (no trailing newline).
pub fn render_text(result: &SyncResult) -> String {
    let action = result
        .action_taken
        .map(|a| a.as_str())
        .unwrap_or("none");

    let mut lines = vec![
        format!("Action: {}", action),
        format!("Remote existed: {}", yes_no(result.remote_exists)),
    ];
    if let Some(transport) = &result.transport {
        lines.push(format!("Transport: {}", transport));
    }
    if let Some(planned) = result.planned_files {
        lines.push(format!("Planned files: {}", planned));
    }
    lines.push(format!(
        "Repositories: {} cloned, {} skipped",
        result.cloned_count(),
        result.skipped_count()
    ));
    lines.extend(result.repo_results.iter().map(repo_line));
    lines.push(format!("Duration: {}ms", result.duration_ms));
    if let Some(error) = &result.error {
        lines.push(format!("Error: {}", error));
    }

    lines.join("\n")
}

/// Pretty JSON for one result.
pub fn render_json(result: &SyncResult) -> String {
    to_pretty(result)
}

/// Text for a batch: one block per workspace, headed by its slug.
pub fn render_batch_text(entries: &[BatchEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let body = match &entry.outcome {
                Ok(result) => render_text(result),
                Err(e) => format!("Error: {}", e),
            };
            format!("== {} ==\n{}", entry.slug, body)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Batch JSON: `{"results": [{"slug", "result"} | {"slug", "error"}]}`
pub fn batch_json(entries: &[BatchEntry]) -> Value {
    let results: Vec<Value> = entries
        .iter()
        .map(|entry| match &entry.outcome {
            Ok(result) => json!({ "slug": entry.slug, "result": result }),
            Err(e) => json!({ "slug": entry.slug, "error": e.to_string() }),
        })
        .collect();
    json!({ "results": results })
}

pub fn render_batch_json(entries: &[BatchEntry]) -> String {
    to_pretty(&batch_json(entries))
}

/// Resolved exclude list plus both transport renderings.
pub fn render_excludes_text(excludes: &ExcludeList) -> String {
    let mut lines: Vec<String> = vec![format!("Excludes ({}):", excludes.len())];
    lines.extend(excludes.iter().map(|p| format!("  {}", p)));
    lines.push(String::new());
    lines.push(format!("rsync: {}", excludes.rsync_args().join(" ")));
    lines.push(format!("tar:   {}", excludes.tar_args().join(" ")));
    lines.join("\n")
}

pub fn render_excludes_json(excludes: &ExcludeList) -> String {
    to_pretty(&json!({
        "excludes": excludes,
        "rsync_args": excludes.rsync_args(),
        "tar_args": excludes.tar_args(),
    }))
}

fn to_pretty<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

/// Process exit code for a set of workspace outcomes.
///
/// Any error wins; otherwise 3 only when every workspace was skipped.
pub fn exit_code(entries: &[BatchEntry]) -> u8 {
    if entries.iter().any(BatchEntry::is_failure) {
        EXIT_FAILURE
    } else if !entries.is_empty() && entries.iter().all(BatchEntry::is_skipped) {
        EXIT_REMOTE_EXISTS
    } else {
        0
    }
}

/// Process exit code for a single workspace run.
pub fn result_exit_code(result: &SyncResult) -> u8 {
    if !result.is_success() {
        EXIT_FAILURE
    } else if result.is_skipped() {
        EXIT_REMOTE_EXISTS
    } else {
        0
    }
}
