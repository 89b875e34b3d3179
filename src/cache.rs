//! Recency Cache Module
//!
//! A bounded key → value cache with least-recently-used eviction, sitting in
//! front of the whole lookup pipeline. A hit short-circuits the hash,
//! directory, chunk scan, and data file read entirely.
//!
//! Eviction is delegated to a fixed-capacity [`lru::LruCache`]; this module
//! adds the thread-safety the concurrent query path needs and the
//! touch-on-get / evict-on-put contract the index relies on. Misses are not
//! cached.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

/// Thread-safe LRU cache from key string to value string
pub struct RecencyCache {
    inner: Mutex<LruCache<String, String>>,
}

impl RecencyCache {
    /// Create a cache bounded to `capacity` entries (minimum 1)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Look up a key; a hit marks the entry most-recently-used
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().get(key).cloned()
    }

    /// Insert or overwrite an entry, evicting the least-recently-used entry
    /// if the cache is full
    pub fn put(&self, key: String, value: String) {
        debug!(key = %key, "cache store");
        self.inner.lock().put(key, value);
    }

    /// Number of resident entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.inner.lock().cap().get()
    }
}
