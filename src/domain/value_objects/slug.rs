//! Workspace slug: the leaf directory name of a workspace on the remote.

use std::fmt;

use thiserror::Error;

use super::shell::has_control_chars;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid workspace slug '{slug}': {reason}")]
pub struct SlugError {
    pub slug: String,
    pub reason: &'static str,
}

/// A single, non-special path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn new(raw: &str) -> Result<Self, SlugError> {
        let fail = |reason| SlugError {
            slug: raw.to_string(),
            reason,
        };
        match raw {
            "" => Err(fail("empty")),
            "." | ".." => Err(fail("reserved name")),
            _ if raw.contains('/') || raw.contains('\\') => Err(fail("contains a path separator")),
            _ if has_control_chars(raw) => Err(fail("contains control characters")),
            _ => Ok(Self(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
