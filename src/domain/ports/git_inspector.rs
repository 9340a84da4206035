//! Git Inspector Port
//!
//! Read-only view of a local repository's configuration, consulted only when
//! the workspace descriptor does not record a remote URL.

use std::path::Path;

pub trait GitInspector {
    /// Configured remote URL of the repository at `repo_dir`, if any.
    fn remote_url(&self, repo_dir: &Path) -> Option<String>;
}
