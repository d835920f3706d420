//! Error types for the file cache library.
//!
//! This module defines the error type covering the structural failure modes
//! of cache operations. Soft I/O failures (a write that did not land, a file
//! that could not be unlinked) are reported as boolean results instead and
//! never appear here; see the crate docs for the two-tier outcome policy.

use std::fmt;
use std::path::PathBuf;

/// The main error type for cache operations.
///
/// Every variant is a structural or precondition failure: the caller asked
/// for something the cache cannot represent, or the directory tree / an
/// entry file is not in a usable state.
#[derive(Debug)]
pub enum CacheError {
    /// A caller-supplied value violates a precondition: the delete target
    /// does not exist, a TTL is unrepresentable, a value cannot be
    /// serialized, or the configured root path is unusable.
    InvalidArgument(String),

    /// A directory could not be created or is occupied by a non-directory.
    Directory { path: PathBuf, reason: String },

    /// An entry file exists but could not be read or decoded, either as the
    /// entry record or as the requested value type.
    Deserialize { path: PathBuf, reason: String },
}

impl CacheError {
    pub(crate) fn directory(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        CacheError::Directory {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn deserialize(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        CacheError::Deserialize {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            CacheError::Directory { path, reason } => {
                write!(f, "directory error at '{}': {}", path.display(), reason)
            }
            CacheError::Deserialize { path, reason } => {
                write!(f, "cannot deserialize '{}': {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for CacheError {}

/// A specialized Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
