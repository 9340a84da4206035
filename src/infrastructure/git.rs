//! Local git inspection via libgit2.

use std::path::Path;

use git2::Repository;
use tracing::debug;

use crate::domain::ports::GitInspector;

/// Preferred remote when a repository has several
const DEFAULT_REMOTE: &str = "origin";

/// Reads remote URLs from local repositories' config.
#[derive(Debug, Default, Clone, Copy)]
pub struct Git2Inspector;

impl GitInspector for Git2Inspector {
    /// `origin` if configured, otherwise the first remote with a URL.
    ///
    /// Only `repo_dir` itself is opened; an enclosing repository is never
    /// consulted.
    fn remote_url(&self, repo_dir: &Path) -> Option<String> {
        let repo = match Repository::open(repo_dir) {
            Ok(repo) => repo,
            Err(e) => {
                debug!(path = %repo_dir.display(), error = %e, "not a git repository");
                return None;
            }
        };

        if let Ok(remote) = repo.find_remote(DEFAULT_REMOTE) {
            if let Some(url) = remote.url().filter(|u| !u.is_empty()) {
                return Some(url.to_string());
            }
        }

        let names = repo.remotes().ok()?;
        names
            .iter()
            .flatten()
            .filter_map(|name| repo.find_remote(name).ok())
            .find_map(|remote| remote.url().filter(|u| !u.is_empty()).map(str::to_string))
    }
}
