//! Bounded verse cache with insertion-order eviction

use lru::LruCache;
use std::fmt;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tilawa_core::{Verse, VerseKey};
use tracing::debug;

/// Default number of verses kept in memory
pub const VERSE_CACHE_CAPACITY: usize = 50;

/// Composite cache key built from the lookup parameters (`verse-surah-lang`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Create a key from verse number, surah number and language code
    pub fn new(verse_id: u32, surah_id: u32, lang: &str) -> Self {
        Self(format!("{}-{}-{}", verse_id, surah_id, lang))
    }

    /// Key for a verse key in the given language
    pub fn for_verse(key: VerseKey, lang: &str) -> Self {
        Self::new(key.ayah(), key.surah(), lang)
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bounded verse cache with strict insertion-order eviction
///
/// Reads never refresh an entry's position: once the cache is full the
/// oldest-inserted verse is evicted, even if it was read a moment ago.
/// The backing `LruCache` is only touched through its non-promoting
/// accessors, which makes its recency order equal to insertion order.
pub struct VerseCache<V = Verse> {
    entries: Mutex<LruCache<String, V>>,
}

impl<V: Clone> VerseCache<V> {
    /// Create a cache holding [`VERSE_CACHE_CAPACITY`] verses
    pub fn new() -> Self {
        Self::with_capacity(VERSE_CACHE_CAPACITY)
    }

    /// Create a cache with the specified capacity (0 is treated as 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Synchronous lookup without side effects
    pub fn get(&self, key: impl AsRef<str>) -> Option<V> {
        self.lock().peek(key.as_ref()).cloned()
    }

    /// Check whether `key` is cached
    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.lock().contains(key.as_ref())
    }

    /// Return the cached value or fetch, store and return it
    ///
    /// Fetch errors propagate unchanged and leave the cache untouched. Two
    /// concurrent misses on the same key may both fetch; the last write wins
    /// in place without moving the entry.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: impl AsRef<str>, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let key = key.as_ref();
        if let Some(hit) = self.get(key) {
            debug!(key, "Verse cache hit");
            return Ok(hit);
        }

        debug!(key, "Verse cache miss, fetching");
        let value = fetch().await?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Store a value, evicting the oldest entry when full
    pub fn insert(&self, key: impl AsRef<str>, value: V) {
        let key = key.as_ref();
        let mut entries = self.lock();

        if let Some(slot) = entries.peek_mut(key) {
            *slot = value;
            return;
        }

        if let Some((evicted, _)) = entries.push(key.to_string(), value) {
            debug!(evicted = %evicted, inserted = key, "Verse cache full, evicted oldest");
        }
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Maximum number of entries
    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    /// Clear the cache
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, V>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V: Clone> Default for VerseCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_format() {
        assert_eq!(CacheKey::new(255, 2, "en").as_str(), "255-2-en");

        let key = VerseKey::new(36, 12).unwrap();
        assert_eq!(CacheKey::for_verse(key, "ar").to_string(), "12-36-ar");
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let cache: VerseCache<u32> = VerseCache::with_capacity(0);
        assert_eq!(cache.capacity(), 1);
    }

    #[test]
    fn default_capacity() {
        let cache: VerseCache<u32> = VerseCache::default();
        assert_eq!(cache.capacity(), VERSE_CACHE_CAPACITY);
        assert!(cache.is_empty());
    }

    #[test]
    fn overwrite_keeps_insertion_position() {
        let cache = VerseCache::with_capacity(2);
        cache.insert("a", 1);
        cache.insert("b", 2);

        // Rewriting "a" must not make it younger than "b"
        cache.insert("a", 10);
        assert_eq!(cache.get("a"), Some(10));

        cache.insert("c", 3);
        assert!(!cache.contains("a"));
        assert_eq!(cache.get("b"), Some(2));
        assert_eq!(cache.get("c"), Some(3));
    }
}
