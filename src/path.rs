//! Key to filesystem path resolution.
//!
//! Keys map onto the directory tree below the cache root: the `|` separator
//! becomes a directory boundary and the final segment becomes an entry file
//! with a fixed `.json` extension. The mapping is pure string rewriting with
//! no filesystem access.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Separator splitting a key into category segments.
pub const CATEGORY_SEPARATOR: char = '|';

/// Extension appended to every entry file.
pub(crate) const ENTRY_EXTENSION: &str = ".json";

/// Placeholder segment standing in for an empty category segment.
const EMPTY_SEGMENT: &str = "/null/";

/// Maps cache keys to paths under a fixed root directory.
#[derive(Debug, Clone)]
pub(crate) struct PathMapper {
    root: PathBuf,
}

impl PathMapper {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    /// Map a key to its entry file path.
    ///
    /// | key    | path under root |
    /// |--------|-----------------|
    /// | `a`    | `a.json`        |
    /// | `a\|b` | `a/b.json`      |
    /// | `a\|\|b` | `a/null/b.json` |
    /// | `a\|`  | `a/.json`       |
    /// | (empty) | `.json`        |
    ///
    /// Separators are rewritten to directory boundaries first, then every
    /// doubled boundary collapses to a literal `null` segment in a single
    /// left-to-right pass, so `a|||b` maps to `a/null/b.json`. Keys are not
    /// sanitized: a key containing `..` or an absolute-path fragment
    /// resolves to wherever the rewrite says, possibly outside the root.
    pub(crate) fn resolve(&self, key: &str) -> PathBuf {
        self.mapped(key, ENTRY_EXTENSION)
    }

    /// Map a key to its directory form, the path an entry file's extension
    /// would otherwise occupy. Used to delete a whole category.
    pub(crate) fn category(&self, key: &str) -> PathBuf {
        self.mapped(key, "")
    }

    fn mapped(&self, key: &str, suffix: &str) -> PathBuf {
        let rel = key
            .replace(CATEGORY_SEPARATOR, "/")
            .replace("//", EMPTY_SEGMENT);
        // Plain concatenation: joining would let a mapped key starting
        // with '/' replace the root instead of nesting under it.
        let mut path = OsString::from(self.root.as_os_str());
        path.push("/");
        path.push(&rel);
        path.push(suffix);
        PathBuf::from(path)
    }
}
