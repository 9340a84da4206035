//! Dry-run preview: count the local files a transfer would send.

use std::path::Path;

use ignore::WalkBuilder;
use tracing::debug;

use crate::domain::value_objects::{ExcludeError, ExcludeList};

/// Walk `root` and count regular files not matched by `excludes`.
///
/// Only the given patterns apply; local `.gitignore` files are not consulted,
/// matching what the transports do. Unreadable entries are skipped.
pub fn count_transferable(root: &Path, excludes: &ExcludeList) -> Result<u64, ExcludeError> {
    let matcher = excludes.matcher(root)?;

    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false).follow_links(false);
    builder.filter_entry(move |entry| {
        if entry.depth() == 0 {
            return true;
        }
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        !matcher.matched(entry.path(), is_dir).is_ignore()
    });

    let mut count = 0;
    for entry in builder.build() {
        match entry {
            Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => count += 1,
            Ok(_) => {}
            Err(e) => debug!(error = %e, "skipping unreadable entry"),
        }
    }
    Ok(count)
}
