//! Repository Path Value Object
//!
//! A workspace-relative repository location that is safe to hand to a remote
//! shell:
//! - Relative (no leading `/`, no drive prefix)
//! - Lexically normalized (`a/./b/../c` -> `a/c`)
//! - Never escapes upward and never names the workspace root itself

use std::fmt;
use std::path::{Component, Path};

use thiserror::Error;

use super::shell::has_control_chars;

/// Error when repository path validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoPathError {
    #[error("path is empty")]
    Empty,
    #[error("path resolves to the workspace root")]
    WorkspaceRoot,
    #[error("absolute paths are not allowed")]
    AbsoluteNotAllowed,
    #[error("path escapes the workspace")]
    EscapesWorkspace,
    #[error("path contains control characters")]
    ControlCharacters,
}

/// A validated, normalized workspace-relative path.
///
/// Always uses `/` separators so it renders identically on every remote.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoPath(String);

impl RepoPath {
    pub fn new(raw: &str) -> Result<Self, RepoPathError> {
        if raw.trim().is_empty() {
            return Err(RepoPathError::Empty);
        }
        if has_control_chars(raw) {
            return Err(RepoPathError::ControlCharacters);
        }
        // Remote shells are POSIX; reject rooted forms from either platform.
        if raw.starts_with('/') || raw.starts_with('\\') || Path::new(raw).is_absolute() {
            return Err(RepoPathError::AbsoluteNotAllowed);
        }

        let mut parts: Vec<&str> = Vec::new();
        for component in Path::new(raw).components() {
            match component {
                Component::Normal(part) => {
                    let part = part.to_str().ok_or(RepoPathError::ControlCharacters)?;
                    parts.push(part);
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    if parts.pop().is_none() {
                        return Err(RepoPathError::EscapesWorkspace);
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(RepoPathError::AbsoluteNotAllowed);
                }
            }
        }

        if parts.is_empty() {
            return Err(RepoPathError::WorkspaceRoot);
        }
        Ok(Self(parts.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parent directory, if the path has more than one component.
    pub fn parent(&self) -> Option<&str> {
        self.0.rsplit_once('/').map(|(parent, _)| parent)
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_relative_path() {
        let path = RepoPath::new("repos/frontend").unwrap();
        assert_eq!(path.as_str(), "repos/frontend");
        assert_eq!(path.parent(), Some("repos"));
    }

    #[test]
    fn single_component_has_no_parent() {
        let path = RepoPath::new("tool").unwrap();
        assert_eq!(path.parent(), None);
    }

    #[test]
    fn normalizes_dots() {
        let path = RepoPath::new("./repos//a/../b/.").unwrap();
        assert_eq!(path.as_str(), "repos/b");
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(RepoPath::new(""), Err(RepoPathError::Empty));
        assert_eq!(RepoPath::new("  "), Err(RepoPathError::Empty));
    }

    #[test]
    fn rejects_workspace_root() {
        assert_eq!(RepoPath::new("."), Err(RepoPathError::WorkspaceRoot));
        assert_eq!(RepoPath::new("repos/.."), Err(RepoPathError::WorkspaceRoot));
    }

    #[test]
    fn rejects_parent() {
        assert_eq!(RepoPath::new(".."), Err(RepoPathError::EscapesWorkspace));
        assert_eq!(
            RepoPath::new("../escape"),
            Err(RepoPathError::EscapesWorkspace)
        );
    }

    #[test]
    fn rejects_hidden_traversal() {
        assert_eq!(
            RepoPath::new("repos/a/../../../escape"),
            Err(RepoPathError::EscapesWorkspace)
        );
    }

    #[test]
    fn rejects_absolute() {
        assert_eq!(
            RepoPath::new("/etc/passwd"),
            Err(RepoPathError::AbsoluteNotAllowed)
        );
        assert_eq!(
            RepoPath::new("\\\\server\\share"),
            Err(RepoPathError::AbsoluteNotAllowed)
        );
    }

    #[test]
    fn rejects_control_characters() {
        assert_eq!(
            RepoPath::new("repos/a\nCLONED"),
            Err(RepoPathError::ControlCharacters)
        );
    }

    #[test]
    fn display_works() {
        let path = RepoPath::new("repos/backend").unwrap();
        assert_eq!(format!("{}", path), "repos/backend");
    }
}
