//! # Simple File Cache
//!
//! A simple, file-backed key-value cache for Rust with TTL expiration and
//! hierarchical categories.
//!
//! ## Features
//!
//! - **File-backed**: one file per entry under a configured root directory;
//!   no daemon, no database, nothing held in memory between calls
//! - **TTL support**: entries expire after a fixed number of seconds or a
//!   calendar-aware interval ("1 month" resolves against the calendar)
//! - **Lazy expiration**: stale entries are purged by the read that finds
//!   them, with no background sweeper
//! - **Categories**: `|` in a key maps to a subdirectory, and deleting a
//!   category key removes every entry beneath it
//! - **Pluggable serialization**: JSON by default, any [`Serializer`]
//!   strategy on request
//! - **Zero unsafe code**: built entirely with safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use simple_file_cache::{CacheConfig, FileCache, Ttl};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let config = CacheConfig::new().path(dir.path()).build();
//! let cache = FileCache::new(config).unwrap();
//!
//! // Store and retrieve values
//! cache.set("user|123", "Alice").unwrap();
//!
//! let name: Option<String> = cache.get("user|123").unwrap();
//! assert_eq!(name.as_deref(), Some("Alice"));
//!
//! // Set with a TTL
//! cache.set_with_ttl("session|abc", "session_data", Ttl::Seconds(60)).unwrap();
//!
//! // Drop a whole category at once
//! cache.set("user|456", "Bob").unwrap();
//! cache.delete("user").unwrap();
//! assert!(!cache.has("user|123"));
//! ```
//!
//! ## Keys and categories
//!
//! Keys are plain strings; the `|` separator nests them into directories.
//! A doubled separator collapses to a literal `null` segment, a pinned
//! compatibility rule:
//!
//! | key      | file under the root |
//! |----------|---------------------|
//! | `a`      | `a.json`            |
//! | `a\|b`   | `a/b.json`          |
//! | `a\|\|b` | `a/null/b.json`     |
//!
//! Keys are not sanitized: a key containing `..` or absolute-path fragments
//! resolves wherever the mapping says, possibly outside the root. Do not
//! build keys from untrusted input.
//!
//! ## Outcomes and errors
//!
//! Operations distinguish structural failures from soft ones. Structural
//! problems (an unusable directory, an unrepresentable TTL, a corrupt entry
//! file, deleting a key that matches nothing) surface as [`CacheError`].
//! Transient I/O outcomes (a write or removal that did not land) degrade to
//! `false` inside an `Ok`. The batch operations fold those booleans with a
//! weak OR: `true` means at least one element succeeded, not all of them.

// Public API
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod serialize;
pub mod ttl;

pub use cache::FileCache;
pub use cli::{CacheCommand, Cli};
pub use config::CacheConfig;
pub use error::{CacheError, CacheResult};
pub use serialize::{JsonSerializer, SerializeError, Serializer};
pub use ttl::{Interval, Ttl};

// Internal modules - not part of the public API
pub(crate) mod entry;
pub(crate) mod fs;
pub(crate) mod path;

pub use path::CATEGORY_SEPARATOR;
