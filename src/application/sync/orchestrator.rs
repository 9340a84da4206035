//! Remote repository orchestration
//!
//! Runs one clone script per workspace and turns its output into per-repo
//! results. Repositories already present on the remote are reported as skipped
//! and never touched.

use tracing::{debug, warn};

use crate::domain::entities::RepoClonePlan;
use crate::domain::ports::{RemoteShell, ScriptOutput};
use crate::domain::services::{parse_output, CloneScript, ScriptEvent};
use crate::domain::value_objects::RemotePath;
use crate::error::HoistError;

use super::result::RepoResult;

#[derive(Debug, Default)]
pub struct CloneOutcome {
    /// Results recognized in script output, even when the script failed
    pub results: Vec<RepoResult>,
    pub error: Option<HoistError>,
}

pub fn materialize_repos(
    shell: &dyn RemoteShell,
    root: &RemotePath,
    plans: &[RepoClonePlan],
) -> CloneOutcome {
    if plans.is_empty() {
        debug!("no repositories to clone");
        return CloneOutcome::default();
    }

    let script = CloneScript::for_plans(root, plans).render();
    let ScriptOutput {
        code,
        output,
        interrupted,
    } = match shell.run_script(&script) {
        Ok(output) => output,
        Err(e) => {
            return CloneOutcome {
                results: Vec::new(),
                error: Some(e.into()),
            }
        }
    };

    let results: Vec<RepoResult> = parse_output(&output)
        .into_iter()
        .map(|event| to_result(event, plans))
        .collect();

    let error = match interrupted {
        Some(e) => {
            warn!(error = %e, reported = results.len(), "clone session interrupted");
            Some(e.into())
        }
        None if code == Some(0) => None,
        None => {
            warn!(?code, "clone script exited non-zero");
            Some(HoistError::CloneScript { code, output })
        }
    };

    CloneOutcome { results, error }
}

fn to_result(event: ScriptEvent, plans: &[RepoClonePlan]) -> RepoResult {
    match event {
        ScriptEvent::Cloned { name, path, url } => {
            debug!(repo = %name, %path, "cloned");
            RepoResult::cloned(name, path, url)
        }
        ScriptEvent::Skipped { name, path, reason } => {
            let remote = plans
                .iter()
                .find(|plan| plan.path.as_str() == path)
                .map(|plan| plan.remote.clone());
            debug!(repo = %name, %path, %reason, "left in place");
            RepoResult::skipped(name, path, remote, reason)
        }
    }
}
