//! The main cache interface.
//!
//! This module provides the primary `FileCache` type that users interact
//! with. It maps keys to entry files under a root directory and performs
//! all reads and writes as plain blocking filesystem calls.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::CacheConfig;
use crate::entry::Entry;
use crate::error::{CacheError, CacheResult};
use crate::fs::remove_tree;
use crate::path::PathMapper;
use crate::serialize::{JsonSerializer, Serializer};
use crate::ttl::{unix_now, Ttl};

/// A file-backed key-value cache with TTL expiration and hierarchical
/// categories.
///
/// # Features
/// - **File-backed**: every entry is one file under the configured root;
///   nothing is held in memory between calls.
/// - **TTL support**: entries can expire after a fixed number of seconds or
///   a calendar-aware interval. Expiry is lazy: stale entries are purged by
///   the read that discovers them.
/// - **Categories**: the `|` separator in a key maps to a subdirectory, and
///   deleting a category key removes every entry beneath it.
/// - **Pluggable serialization**: values are stored as JSON by default; any
///   [`Serializer`] strategy can replace it.
///
/// # Example
/// ```
/// use simple_file_cache::{CacheConfig, FileCache, Ttl};
///
/// let dir = tempfile::tempdir().unwrap();
/// let config = CacheConfig::new().path(dir.path()).build();
/// let cache = FileCache::new(config).unwrap();
///
/// // Basic operations
/// cache.set("user|123", "Alice").unwrap();
/// let name: Option<String> = cache.get("user|123").unwrap();
/// assert_eq!(name.as_deref(), Some("Alice"));
///
/// // With explicit TTL
/// cache.set_with_ttl("session|abc", "data", Ttl::Seconds(60)).unwrap();
///
/// // Deleting the category removes both entries
/// cache.delete("user").unwrap();
/// assert!(!cache.has("user|123"));
/// ```
///
/// Cloning a `FileCache` produces a second handle onto the same directory
/// tree; clones share all state through the filesystem.
#[derive(Debug, Clone)]
pub struct FileCache<S = JsonSerializer> {
    /// Key to path resolution, carrying the canonicalized root.
    paths: PathMapper,

    /// Strategy producing and consuming entry payload text.
    serializer: S,

    /// TTL applied by `set` when none is given explicitly.
    default_ttl: Option<Ttl>,
}

impl FileCache<JsonSerializer> {
    /// Create a new cache with the given configuration, storing values
    /// as JSON.
    ///
    /// The root directory is created if it does not exist. Fails with
    /// [`CacheError::InvalidArgument`] when the root cannot be created or
    /// resolves to something other than a directory.
    ///
    /// # Arguments
    /// * `config` - Configuration options for the cache.
    ///
    /// # Example
    /// ```
    /// use simple_file_cache::{CacheConfig, FileCache};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let cache = FileCache::new(CacheConfig::new().path(dir.path()).build()).unwrap();
    /// ```
    pub fn new(config: CacheConfig) -> CacheResult<Self> {
        Self::with_serializer(config, JsonSerializer)
    }
}

impl<S: Serializer> FileCache<S> {
    /// Create a new cache using a custom serialization strategy.
    ///
    /// The strategy defines the payload text embedded in every entry file;
    /// entries written under one strategy are only readable under a
    /// compatible one.
    pub fn with_serializer(config: CacheConfig, serializer: S) -> CacheResult<Self> {
        let root = config
            .path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("cache"));
        let root = prepare_root(&root)?;
        Ok(Self {
            paths: PathMapper::new(root),
            serializer,
            default_ttl: config.default_ttl,
        })
    }

    /// The canonicalized root directory this cache writes under.
    pub fn root(&self) -> &Path {
        self.paths.root()
    }

    /// Fetch a value from the cache.
    ///
    /// Returns `Ok(None)` when the entry file does not exist, including
    /// when a parent segment of its path is occupied by another entry
    /// file, when it carries no payload, or when it has expired. An
    /// expired entry is deleted on the spot (lazy expiration). A file that
    /// exists but cannot be read or decoded fails with
    /// [`CacheError::Deserialize`] and is left in place.
    ///
    /// # Arguments
    /// * `key` - The key to look up.
    ///
    /// # Example
    /// ```
    /// use simple_file_cache::{CacheConfig, FileCache};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let cache = FileCache::new(CacheConfig::new().path(dir.path()).build()).unwrap();
    /// cache.set("counter", &41).unwrap();
    ///
    /// let value: Option<i64> = cache.get("counter").unwrap();
    /// assert_eq!(value, Some(41));
    ///
    /// let missing: Option<i64> = cache.get("absent").unwrap();
    /// assert_eq!(missing, None);
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        let path = self.paths.resolve(key);
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            // A parent segment occupied by an entry file: the entry cannot
            // exist there, same miss as an absent file.
            Err(err) if err.kind() == io::ErrorKind::NotADirectory => return Ok(None),
            Err(err) => return Err(CacheError::deserialize(path, err)),
        };

        let entry: Entry =
            serde_json::from_slice(&raw).map_err(|err| CacheError::deserialize(&path, err))?;

        if entry.is_expired() {
            debug!(key = %key, "expired entry purged on read");
            self.delete(key)?;
            return Ok(None);
        }

        let Some(data) = entry.data else {
            return Ok(None);
        };
        let value = self
            .serializer
            .deserialize(&data)
            .map_err(|err| CacheError::deserialize(path, err))?;
        Ok(Some(value))
    }

    /// Fetch a value, falling back to a default on a miss.
    ///
    /// # Example
    /// ```
    /// use simple_file_cache::{CacheConfig, FileCache};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let cache = FileCache::new(CacheConfig::new().path(dir.path()).build()).unwrap();
    ///
    /// assert_eq!(cache.get_or("retries", 3).unwrap(), 3);
    /// cache.set("retries", &5).unwrap();
    /// assert_eq!(cache.get_or("retries", 3).unwrap(), 5);
    /// ```
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> CacheResult<T> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Store a value in the cache.
    ///
    /// If a `default_ttl` is configured, entries will use that TTL.
    /// Otherwise, entries will not expire. Parent directories for category
    /// keys are created as needed; a failure there is
    /// [`CacheError::Directory`]. An I/O failure during the write itself
    /// is soft and reported as `Ok(false)`.
    ///
    /// # Arguments
    /// * `key` - The key to store the value under.
    /// * `value` - The value to store. Must be serializable.
    ///
    /// # Example
    /// ```
    /// use simple_file_cache::{CacheConfig, FileCache};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let cache = FileCache::new(CacheConfig::new().path(dir.path()).build()).unwrap();
    ///
    /// assert!(cache.set("greeting", "hello").unwrap());
    /// assert!(cache.set("primes", &[2, 3, 5, 7]).unwrap());
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> CacheResult<bool> {
        self.store(key, value, self.default_ttl)
    }

    /// Store a value in the cache with a specific TTL.
    ///
    /// The entry becomes stale once the TTL has elapsed and is purged by
    /// the next read. A negative TTL produces an entry that is already
    /// stale.
    ///
    /// # Arguments
    /// * `key` - The key to store the value under.
    /// * `value` - The value to store.
    /// * `ttl` - How long the entry should live.
    ///
    /// # Example
    /// ```
    /// use simple_file_cache::{CacheConfig, FileCache, Interval, Ttl};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let cache = FileCache::new(CacheConfig::new().path(dir.path()).build()).unwrap();
    ///
    /// cache.set_with_ttl("token", "abc123", Ttl::Seconds(3600)).unwrap();
    /// cache.set_with_ttl(
    ///     "report|monthly",
    ///     "totals",
    ///     Ttl::Interval(Interval { months: 1, ..Interval::default() }),
    /// ).unwrap();
    /// ```
    pub fn set_with_ttl<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Ttl,
    ) -> CacheResult<bool> {
        self.store(key, value, Some(ttl))
    }

    fn store<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Ttl>,
    ) -> CacheResult<bool> {
        let path = self.paths.resolve(key);
        prepare_parent(&path)?;

        let expire = match ttl {
            Some(ttl) => ttl.expire_at(unix_now())?,
            None => 0,
        };
        let data = self.serializer.serialize(value).map_err(|err| {
            CacheError::InvalidArgument(format!(
                "value for key '{}' cannot be serialized: {}",
                key, err
            ))
        })?;
        let entry = if expire == 0 {
            Entry::new(data)
        } else {
            Entry::with_expiration(data, expire)
        };
        let record = serde_json::to_string(&entry).map_err(|err| {
            CacheError::InvalidArgument(format!(
                "entry for key '{}' cannot be encoded: {}",
                key, err
            ))
        })?;

        match write_locked(&path, record.as_bytes()) {
            Ok(()) => Ok(true),
            Err(err) => {
                warn!(key = %key, path = %path.display(), error = %err, "entry write failed");
                Ok(false)
            }
        }
    }

    /// Delete an entry or a whole category.
    ///
    /// If an entry file exists for the key, it is unlinked. Otherwise, if
    /// the key names a category (a directory of entries), the category and
    /// everything beneath it is removed. The returned boolean reports
    /// whether the removal fully succeeded. A key matching neither fails
    /// with [`CacheError::InvalidArgument`], including a repeated delete
    /// of the same key.
    ///
    /// # Arguments
    /// * `key` - The entry or category to delete.
    ///
    /// # Example
    /// ```
    /// use simple_file_cache::{CacheConfig, FileCache};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let cache = FileCache::new(CacheConfig::new().path(dir.path()).build()).unwrap();
    /// cache.set("session|a", &1).unwrap();
    /// cache.set("session|b", &2).unwrap();
    ///
    /// // Deleting the category removes every key under it.
    /// assert!(cache.delete("session").unwrap());
    /// assert!(!cache.has("session|a"));
    /// assert!(!cache.has("session|b"));
    /// ```
    pub fn delete(&self, key: &str) -> CacheResult<bool> {
        let path = self.paths.resolve(key);
        if path.is_file() {
            return Ok(match fs::remove_file(&path) {
                Ok(()) => true,
                Err(err) => {
                    warn!(key = %key, path = %path.display(), error = %err, "entry removal failed");
                    false
                }
            });
        }

        let dir = self.paths.category(key);
        if dir.is_dir() {
            debug!(key = %key, "removing category");
            return Ok(remove_tree(&dir));
        }

        Err(CacheError::InvalidArgument(format!(
            "key '{}' matches neither an entry nor a category",
            key
        )))
    }

    /// Remove the entire cache root and everything under it.
    ///
    /// Returns `true` when the whole tree was removed. The root itself is
    /// gone afterwards; the next `set` recreates it. Clearing a root that
    /// no longer exists returns `false`.
    ///
    /// # Example
    /// ```
    /// use simple_file_cache::{CacheConfig, FileCache};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let cache = FileCache::new(CacheConfig::new().path(dir.path().join("cache")).build()).unwrap();
    /// cache.set("a", &1).unwrap();
    ///
    /// assert!(cache.clear());
    /// assert!(!cache.has("a"));
    ///
    /// // The next write recreates the root.
    /// assert!(cache.set("b", &2).unwrap());
    /// ```
    pub fn clear(&self) -> bool {
        debug!(root = %self.paths.root().display(), "clearing cache");
        remove_tree(self.paths.root())
    }

    /// Check whether an entry file exists for the key.
    ///
    /// This is an existence check only: it does not read the entry, so an
    /// already-expired entry that no read has purged yet still reports
    /// `true`. Use `get` when freshness matters.
    ///
    /// # Example
    /// ```
    /// use simple_file_cache::{CacheConfig, FileCache, Ttl};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let cache = FileCache::new(CacheConfig::new().path(dir.path()).build()).unwrap();
    /// cache.set_with_ttl("stale", "value", Ttl::Seconds(-5)).unwrap();
    ///
    /// assert!(cache.has("stale")); // expired, but not yet purged
    /// let _: Option<String> = cache.get("stale").unwrap();
    /// assert!(!cache.has("stale"));
    /// ```
    pub fn has(&self, key: &str) -> bool {
        self.paths.resolve(key).exists()
    }

    /// Fetch several values at once.
    ///
    /// Calls `get` per key and collects the results into a map preserving
    /// the input order. Misses appear as `None`; the first structural
    /// error aborts the batch.
    ///
    /// # Example
    /// ```
    /// use simple_file_cache::{CacheConfig, FileCache};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let cache = FileCache::new(CacheConfig::new().path(dir.path()).build()).unwrap();
    /// cache.set("a", &1).unwrap();
    /// cache.set("b", &2).unwrap();
    ///
    /// let values = cache.get_multiple::<i64, _>(["a", "b", "missing"]).unwrap();
    /// assert_eq!(values["a"], Some(1));
    /// assert_eq!(values["missing"], None);
    /// ```
    pub fn get_multiple<'a, T, I>(&self, keys: I) -> CacheResult<IndexMap<String, Option<T>>>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = &'a str>,
    {
        let mut values = IndexMap::new();
        for key in keys {
            values.insert(key.to_string(), self.get(key)?);
        }
        Ok(values)
    }

    /// Store several key-value pairs, all with the same optional TTL.
    ///
    /// Every pair is attempted; the result is `Ok(true)` when at least one
    /// individual write succeeded. This is deliberately a weak aggregate,
    /// not an all-or-nothing transaction. An empty input yields
    /// `Ok(false)`.
    ///
    /// # Example
    /// ```
    /// use simple_file_cache::{CacheConfig, FileCache};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let cache = FileCache::new(CacheConfig::new().path(dir.path()).build()).unwrap();
    ///
    /// assert!(cache.set_multiple([("a", 1), ("b", 2)], None).unwrap());
    /// assert_eq!(cache.get_or("b", 0).unwrap(), 2);
    /// ```
    pub fn set_multiple<'a, T, I>(&self, entries: I, ttl: Option<Ttl>) -> CacheResult<bool>
    where
        T: Serialize,
        I: IntoIterator<Item = (&'a str, T)>,
    {
        let mut stored = false;
        for (key, value) in entries {
            stored = self.store(key, &value, ttl.or(self.default_ttl))? || stored;
        }
        Ok(stored)
    }

    /// Delete several entries or categories.
    ///
    /// Same weak aggregate contract as [`FileCache::set_multiple`]: every
    /// key is attempted and `Ok(true)` means at least one removal
    /// succeeded. A key matching nothing aborts the batch with
    /// [`CacheError::InvalidArgument`], exactly as a single `delete` does.
    pub fn delete_multiple<'a, I>(&self, keys: I) -> CacheResult<bool>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut deleted = false;
        for key in keys {
            deleted = self.delete(key)? || deleted;
        }
        Ok(deleted)
    }
}

/// Create the root if missing, canonicalize it, and require a directory.
fn prepare_root(root: &Path) -> CacheResult<PathBuf> {
    if !root.exists() {
        fs::create_dir_all(root).map_err(|err| {
            CacheError::InvalidArgument(format!(
                "cannot create cache directory '{}': {}",
                root.display(),
                err
            ))
        })?;
    }
    let root = root.canonicalize().map_err(|err| {
        CacheError::InvalidArgument(format!(
            "cannot resolve cache directory '{}': {}",
            root.display(),
            err
        ))
    })?;
    if !root.is_dir() {
        return Err(CacheError::InvalidArgument(format!(
            "cache path '{}' is not a directory",
            root.display()
        )));
    }
    Ok(root)
}

/// Ensure the entry file's parent directory exists.
fn prepare_parent(path: &Path) -> CacheResult<()> {
    let Some(dir) = path.parent() else {
        return Err(CacheError::directory(path, "entry path has no parent"));
    };
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|err| CacheError::directory(dir, err))?;
    }
    if !dir.is_dir() {
        return Err(CacheError::directory(dir, "exists but is not a directory"));
    }
    Ok(())
}

/// Write the entry under an exclusive advisory lock.
fn write_locked(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;
    // Truncation happens after the lock is held, not at open time.
    file.lock()?;
    file.set_len(0)?;
    file.write_all(contents)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::SerializeError;

    fn temp_cache() -> (tempfile::TempDir, FileCache) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = CacheConfig::new().path(dir.path()).build();
        let cache = FileCache::new(config).expect("create cache");
        (dir, cache)
    }

    #[test]
    fn test_basic_set_get() {
        let (_dir, cache) = temp_cache();

        assert!(cache.set("key1", "value1").unwrap());
        let value: Option<String> = cache.get("key1").unwrap();
        assert_eq!(value.as_deref(), Some("value1"));
    }

    #[test]
    fn test_get_nonexistent() {
        let (_dir, cache) = temp_cache();

        let value: Option<String> = cache.get("nonexistent").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_overwrite() {
        let (_dir, cache) = temp_cache();

        cache.set("key1", &1).unwrap();
        cache.set("key1", &2).unwrap();

        assert_eq!(cache.get_or("key1", 0).unwrap(), 2);
    }

    #[test]
    fn test_expired_entry_purged_on_get() {
        let (_dir, cache) = temp_cache();

        cache.set_with_ttl("stale", "value", Ttl::Seconds(-5)).unwrap();
        assert!(cache.has("stale"));

        let value: Option<String> = cache.get("stale").unwrap();
        assert!(value.is_none());
        assert!(!cache.has("stale"));
    }

    #[test]
    fn test_default_ttl_applies_to_untimed_set() {
        let dir = tempfile::tempdir().unwrap();
        let config = CacheConfig::new()
            .path(dir.path())
            .default_ttl(Ttl::Seconds(-5))
            .build();
        let cache = FileCache::new(config).unwrap();

        cache.set("key", "value").unwrap();
        let value: Option<String> = cache.get("key").unwrap();
        assert!(value.is_none());

        // An explicit TTL overrides the default.
        cache.set_with_ttl("key", "value", Ttl::Seconds(600)).unwrap();
        let value: Option<String> = cache.get("key").unwrap();
        assert_eq!(value.as_deref(), Some("value"));
    }

    #[test]
    fn test_delete_missing_is_invalid_argument() {
        let (_dir, cache) = temp_cache();

        let err = cache.delete("absent").unwrap_err();
        assert!(matches!(err, CacheError::InvalidArgument(_)));
    }

    #[test]
    fn test_type_mismatch_is_deserialize_error() {
        let (_dir, cache) = temp_cache();

        cache.set("text", "not a number").unwrap();
        let err = cache.get::<i64>("text").unwrap_err();
        assert!(matches!(err, CacheError::Deserialize { .. }));
    }

    #[test]
    fn test_clone_shares_directory() {
        let (_dir, cache1) = temp_cache();
        let cache2 = cache1.clone();

        cache1.set("key", &42).unwrap();
        assert_eq!(cache2.get_or("key", 0).unwrap(), 42);
    }

    #[test]
    fn test_threaded_distinct_keys() {
        use std::thread;

        let (_dir, cache) = temp_cache();
        let mut handles = vec![];

        for t in 0..4 {
            let cache = cache.clone();
            let handle = thread::spawn(move || {
                for i in 0..25 {
                    let key = format!("thread_{}|key_{}", t, i);
                    cache.set(&key, &format!("value_{}_{}", t, i)).unwrap();
                    let value: Option<String> = cache.get(&key).unwrap();
                    assert!(value.is_some());
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_custom_serializer() {
        #[derive(Debug, Clone, Copy)]
        struct PrettyJson;

        impl Serializer for PrettyJson {
            fn serialize<T: Serialize + ?Sized>(
                &self,
                value: &T,
            ) -> Result<String, SerializeError> {
                Ok(serde_json::to_string_pretty(value)?)
            }

            fn deserialize<T: DeserializeOwned>(&self, data: &str) -> Result<T, SerializeError> {
                Ok(serde_json::from_str(data)?)
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let config = CacheConfig::new().path(dir.path()).build();
        let cache = FileCache::with_serializer(config, PrettyJson).unwrap();

        cache.set("list", &vec![1, 2, 3]).unwrap();
        let value: Option<Vec<i32>> = cache.get("list").unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));

        // The pretty payload is embedded in the entry record.
        let raw = fs::read_to_string(dir.path().join("list.json")).unwrap();
        let record: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(record["data"].as_str().unwrap().contains('\n'));
    }
}
