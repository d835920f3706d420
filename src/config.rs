//! Configuration for the file cache.
//!
//! This module provides a builder pattern for configuring cache behavior:
//! the root directory and an optional default TTL.

use std::path::{Path, PathBuf};

use crate::ttl::Ttl;

/// Configuration for creating a new cache instance.
///
/// Use the builder pattern to construct configuration:
///
/// ```
/// use simple_file_cache::{CacheConfig, Ttl};
///
/// let config = CacheConfig::new()
///     .path("/var/cache/myapp")
///     .default_ttl(Ttl::Seconds(300))
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Root directory for entry files and category subdirectories.
    /// `None` means `cache` under the system temp directory.
    pub(crate) path: Option<PathBuf>,

    /// Default TTL for entries when not explicitly specified.
    /// `None` means entries don't expire by default.
    pub(crate) default_ttl: Option<Ttl>,
}

impl CacheConfig {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache root directory.
    ///
    /// The directory is created on cache construction if it does not
    /// exist. When unset, the cache lives in `cache` under the system
    /// temp directory.
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the default TTL for entries.
    ///
    /// Entries written without an explicit TTL will use this value.
    /// Pass `Ttl::Seconds(0)` to disable the default again.
    pub fn default_ttl(mut self, ttl: Ttl) -> Self {
        self.default_ttl = match ttl {
            Ttl::Seconds(0) => None,
            other => Some(other),
        };
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> Self {
        self
    }

    /// Get the configured root directory, if set.
    pub fn get_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the default TTL, if set.
    pub fn get_default_ttl(&self) -> Option<Ttl> {
        self.default_ttl
    }
}
