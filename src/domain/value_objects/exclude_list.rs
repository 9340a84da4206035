//! Exclude list value object
//!
//! An ordered, duplicate-free list of exclude patterns plus the two renderings
//! the transports need. Pattern files use gitignore-style comment rules.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use serde::Serialize;
use thiserror::Error;

/// Maximum size for an exclude pattern file (64KB)
const MAX_FILE_SIZE: u64 = 65536;

/// Maximum number of patterns allowed in one file
const MAX_PATTERNS: usize = 1000;

/// Errors raised while loading or compiling exclude patterns.
#[derive(Debug, Error)]
pub enum ExcludeError {
    #[error("cannot read exclude file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("exclude file exceeds {}KB limit ({size} bytes): {path}", .limit / 1024)]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("exclude file has {count} patterns, exceeds {limit} limit: {path}")]
    TooManyPatterns {
        path: PathBuf,
        count: usize,
        limit: usize,
    },

    #[error("invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Ordered set of exclude patterns.
///
/// Insertion order is kept so rendered argument lists are deterministic;
/// pushing a pattern that is already present is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExcludeList {
    patterns: Vec<String>,
}

impl ExcludeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pattern. Returns false for blanks and duplicates.
    pub fn push(&mut self, pattern: impl AsRef<str>) -> bool {
        let pattern = pattern.as_ref().trim();
        if pattern.is_empty() || self.contains(pattern) {
            return false;
        }
        self.patterns.push(pattern.to_string());
        true
    }

    /// Remove a pattern if present.
    pub fn remove(&mut self, pattern: &str) -> bool {
        let pattern = pattern.trim();
        let before = self.patterns.len();
        self.patterns.retain(|p| p != pattern);
        self.patterns.len() != before
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.iter().any(|p| p == pattern)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Render as rsync arguments (`--exclude=<pattern>`, verbatim).
    pub fn rsync_args(&self) -> Vec<String> {
        self.iter().map(|p| format!("--exclude={}", p)).collect()
    }

    /// Render as tar arguments.
    ///
    /// tar matches member names like `./a/node_modules/x`, so directory
    /// patterns are widened to `*/<dir>/*` and root-anchored patterns
    /// (leading `/`) become `./<path>`.
    pub fn tar_args(&self) -> Vec<String> {
        self.iter()
            .map(|p| format!("--exclude={}", tar_pattern(p)))
            .collect()
    }

    /// Compile a gitignore-style matcher rooted at `root`.
    ///
    /// Used to preview which local files a transfer would send.
    pub fn matcher(&self, root: &Path) -> Result<Gitignore, ExcludeError> {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in self.iter() {
            builder
                .add_line(None, pattern)
                .map_err(|e| ExcludeError::InvalidPattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })?;
        }
        builder.build().map_err(|e| ExcludeError::InvalidPattern {
            pattern: String::new(),
            message: e.to_string(),
        })
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExcludeList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<S: AsRef<str>> Extend<S> for ExcludeList {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for pattern in iter {
            self.push(pattern);
        }
    }
}

fn tar_pattern(pattern: &str) -> String {
    if let Some(anchored) = pattern.strip_prefix('/') {
        return format!("./{}", anchored.trim_end_matches('/'));
    }
    match pattern.strip_suffix('/') {
        Some(dir) => format!("*/{}/*", dir),
        None => pattern.to_string(),
    }
}

/// Parse pattern file content: trimmed lines, blanks and `#` comments dropped.
pub fn parse_patterns(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Load patterns from a file. A missing file is an error.
pub fn load_pattern_file(path: &Path) -> Result<Vec<String>, ExcludeError> {
    let io_err = |source| ExcludeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(io_err)?;
    if metadata.len() > MAX_FILE_SIZE {
        return Err(ExcludeError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: MAX_FILE_SIZE,
        });
    }

    let content = fs::read_to_string(path).map_err(io_err)?;
    let patterns = parse_patterns(&content);
    if patterns.len() > MAX_PATTERNS {
        return Err(ExcludeError::TooManyPatterns {
            path: path.to_path_buf(),
            count: patterns.len(),
            limit: MAX_PATTERNS,
        });
    }
    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn push_keeps_first_occurrence_order() {
        let mut list = ExcludeList::new();
        assert!(list.push("b"));
        assert!(list.push("a"));
        assert!(!list.push("b"));
        assert!(!list.push("   "));
        assert_eq!(list.as_slice(), ["b", "a"]);
    }

    #[test]
    fn rsync_rendering_is_verbatim() {
        let list: ExcludeList = ["node_modules/", "*.log"].into_iter().collect();
        assert_eq!(
            list.rsync_args().join(" "),
            "--exclude=node_modules/ --exclude=*.log"
        );
    }

    #[test]
    fn tar_rendering_widens_directories() {
        let list: ExcludeList = ["node_modules/", "*.log"].into_iter().collect();
        assert_eq!(
            list.tar_args().join(" "),
            "--exclude=*/node_modules/* --exclude=*.log"
        );
    }

    #[test]
    fn tar_rendering_anchors_leading_slash() {
        let list: ExcludeList = ["/repos/", "/Makefile"].into_iter().collect();
        assert_eq!(list.tar_args(), ["--exclude=./repos", "--exclude=./Makefile"]);
    }

    #[test]
    fn parse_drops_comments_and_blanks() {
        let content = "# build output\n\n  target/  \n#node_modules/\n*.log\n\t\n";
        assert_eq!(parse_patterns(content), ["target/", "*.log"]);
    }

    #[test]
    fn missing_file_is_error() {
        let dir = tempdir().unwrap();
        let result = load_pattern_file(&dir.path().join("nope.txt"));
        assert!(matches!(result, Err(ExcludeError::Io { .. })));
    }

    #[test]
    fn file_too_large_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("excludes");
        fs::write(&path, "x\n".repeat(40000)).unwrap();
        assert!(matches!(
            load_pattern_file(&path),
            Err(ExcludeError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn too_many_patterns_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("excludes");
        let content: String = (0..1100).map(|i| format!("f{}\n", i)).collect();
        fs::write(&path, content).unwrap();
        assert!(matches!(
            load_pattern_file(&path),
            Err(ExcludeError::TooManyPatterns { .. })
        ));
    }

    #[test]
    fn matcher_follows_gitignore_semantics() {
        let list: ExcludeList = ["node_modules/", "*.log", "/repos/"].into_iter().collect();
        let root = Path::new("/ws");
        let matcher = list.matcher(root).unwrap();

        let ignored = |p: &str, dir: bool| {
            matcher
                .matched_path_or_any_parents(root.join(p), dir)
                .is_ignore()
        };
        assert!(ignored("node_modules", true));
        assert!(ignored("web/node_modules/react/index.js", false));
        assert!(ignored("debug.log", false));
        assert!(ignored("repos/frontend/main.rs", false));
        assert!(!ignored("tools/repos", false));
        assert!(!ignored("README.md", false));
    }
}
