//! Remote path value object
//!
//! A POSIX path on the remote host. Kept as a string because it never touches
//! the local filesystem; rendering for a shell or for rsync is explicit.

use std::fmt;

use super::shell::shell_path;
use super::Slug;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemotePath(String);

impl RemotePath {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.is_empty() {
            return Self(".".to_string());
        }
        Self(path)
    }

    /// `<root>/<slug>`
    pub fn workspace(root: &str, slug: &Slug) -> Self {
        Self::new(root).join(slug.as_str())
    }

    /// `<root>/.<slug>.hoist-lock`, a sibling of the workspace directory.
    pub fn lock_for(root: &str, slug: &Slug) -> Self {
        Self::new(root).join(&format!(".{}.hoist-lock", slug))
    }

    fn join(&self, leaf: &str) -> Self {
        let base = self.0.trim_end_matches('/');
        Self(format!("{}/{}", base, leaf))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Quoted form for remote shell commands (`~` stays expandable).
    pub fn shell(&self) -> String {
        shell_path(&self.0)
    }

    /// Form used in an rsync `host:path` target.
    ///
    /// rsync resolves relative remote paths against the login directory, so
    /// `~/x` becomes `x`.
    pub fn rsync_target(&self) -> String {
        match self.0.as_str() {
            "~" | "~/" => ".".to_string(),
            p => p.strip_prefix("~/").unwrap_or(p).to_string(),
        }
    }
}

impl fmt::Display for RemotePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
