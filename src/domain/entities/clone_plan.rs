//! Clone plan: one repository eligible for remote materialization.

use crate::domain::value_objects::RepoPath;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoClonePlan {
    pub name: String,
    pub path: RepoPath,
    /// Remote URL, from the descriptor or the local repository's config
    pub remote: String,
}

impl RepoClonePlan {
    pub fn new(name: impl Into<String>, path: RepoPath, remote: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path,
            remote: remote.into(),
        }
    }
}
