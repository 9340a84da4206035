//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod exclude_list;
mod remote_path;
mod repo_path;
mod shell;
mod slug;

pub use exclude_list::{load_pattern_file, parse_patterns, ExcludeError, ExcludeList};
pub use remote_path::RemotePath;
pub use repo_path::{RepoPath, RepoPathError};
pub use shell::{has_control_chars, shell_path, shell_quote};
pub use slug::{Slug, SlugError};
