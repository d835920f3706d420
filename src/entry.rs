//! On-disk cache entry record.

use serde::{Deserialize, Serialize};

use crate::ttl;

/// A single persisted cache entry.
///
/// Serialized as a small JSON record:
///
/// ```json
/// { "expire": 1735689600, "data": "\"cached value\"" }
/// ```
///
/// Both fields tolerate absence when reading records written by other
/// tooling: a missing `expire` means the entry never expires, and a
/// missing `data` makes the entry read as a miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unix timestamp (seconds) after which the entry is stale.
    /// `0` means no expiration.
    #[serde(default)]
    pub(crate) expire: i64,

    /// The serialized payload, as produced by the configured serializer.
    #[serde(default)]
    pub(crate) data: Option<String>,
}

impl Entry {
    /// Create a new entry with no expiration.
    pub fn new(data: String) -> Self {
        Self {
            expire: 0,
            data: Some(data),
        }
    }

    /// Create a new entry expiring at the given Unix timestamp.
    pub fn with_expiration(data: String, expire: i64) -> Self {
        Self {
            expire,
            data: Some(data),
        }
    }

    /// Check if this entry has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(ttl::unix_now())
    }

    /// Check if this entry has expired at a given time.
    /// This is useful for testing with a controlled clock.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expire != 0 && self.expire < now
    }
}
