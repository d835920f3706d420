//! Recursive directory removal.

use std::fs;
use std::path::Path;

use tracing::warn;
use walkdir::WalkDir;

/// Remove a directory tree, children before parents.
///
/// Returns `true` when every entry, including `path` itself, was removed.
/// Symlinks are unlinked, never followed. A failed removal or walk error
/// flips the result to `false` but does not stop the walk, so the tree is
/// removed as far as possible. Not safe against concurrent mutation of
/// the tree.
pub(crate) fn remove_tree(path: &Path) -> bool {
    let mut removed = true;
    for entry in WalkDir::new(path).contents_first(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "walk failed during tree removal");
                removed = false;
                continue;
            }
        };
        let result = if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())
        } else {
            fs::remove_file(entry.path())
        };
        if let Err(err) = result {
            warn!(path = %entry.path().display(), error = %err, "failed to remove");
            removed = false;
        }
    }
    removed
}
