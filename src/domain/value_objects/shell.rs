//! Shell quoting
//!
//! Every value interpolated into a remote shell command goes through
//! [`shell_quote`] or [`shell_path`]. Names, paths and URLs come from workspace
//! descriptors and local git config, so none of them is trusted.

/// Quote a value as a single-quoted POSIX shell literal.
///
/// Embedded single quotes close the literal, emit an escaped quote, and reopen it.
pub fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Quote a remote path, keeping a leading `~` expandable.
///
/// `~` and `~/rest` become `"$HOME"` and `"$HOME"/'rest'`; the rest of the path
/// is quoted with [`shell_quote`]. `~user` forms are quoted literally.
pub fn shell_path(path: &str) -> String {
    if path == "~" {
        return "\"$HOME\"".to_string();
    }
    match path.strip_prefix("~/") {
        Some("") => "\"$HOME\"".to_string(),
        Some(rest) => format!("\"$HOME\"/{}", shell_quote(rest)),
        None => shell_quote(path),
    }
}

/// Check for bytes that would break line-oriented script output.
pub fn has_control_chars(s: &str) -> bool {
    s.chars().any(char::is_control)
}
