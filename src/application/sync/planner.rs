//! Clone planning
//!
//! Decides, per repository entry, whether it can be cloned on the remote. The
//! remote URL comes from the descriptor when recorded, otherwise from the local
//! repository's git config. Entries that cannot be planned become skip results
//! without any remote interaction.

use std::path::Path;

use tracing::warn;

use crate::domain::entities::{RepoClonePlan, RepoEntry};
use crate::domain::ports::GitInspector;
use crate::domain::value_objects::{has_control_chars, RepoPath};

use super::result::{RepoResult, MISSING_REMOTE};

/// Plans in descriptor order, plus the entries skipped while planning.
#[derive(Debug, Default)]
pub struct ClonePlanning {
    pub plans: Vec<RepoClonePlan>,
    pub skipped: Vec<RepoResult>,
}

pub fn plan_clones(
    workspace_dir: &Path,
    repos: &[RepoEntry],
    git: &dyn GitInspector,
) -> ClonePlanning {
    let mut planning = ClonePlanning::default();

    for entry in repos {
        match plan_one(workspace_dir, entry, git) {
            Ok(plan) => planning.plans.push(plan),
            Err(skip) => {
                warn!(
                    repo = %entry.name,
                    path = %entry.path,
                    reason = skip.message.as_deref().unwrap_or_default(),
                    "skipping repository"
                );
                planning.skipped.push(skip);
            }
        }
    }

    planning
}

fn plan_one(
    workspace_dir: &Path,
    entry: &RepoEntry,
    git: &dyn GitInspector,
) -> Result<RepoClonePlan, RepoResult> {
    let skip = |remote: Option<String>, message: String| {
        RepoResult::skipped(&entry.name, &entry.path, remote, message)
    };

    let path = RepoPath::new(&entry.path)
        .map_err(|e| skip(entry.remote().map(str::to_string), format!("invalid path: {e}")))?;

    if entry.name.is_empty() || has_control_chars(&entry.name) {
        return Err(skip(entry.remote().map(str::to_string), "invalid name".into()));
    }

    let remote = match entry.remote() {
        Some(remote) => remote.to_string(),
        None => git
            .remote_url(&workspace_dir.join(path.as_str()))
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| skip(None, MISSING_REMOTE.into()))?,
    };

    if has_control_chars(&remote) {
        return Err(skip(Some(remote), "invalid remote".into()));
    }

    Ok(RepoClonePlan::new(&entry.name, path, remote))
}
