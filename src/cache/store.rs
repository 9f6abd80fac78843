//! Cache Store Module
//!
//! Main cache engine combining recency-ordered storage with TTL expiration and
//! statistics. The store itself is not synchronized; see
//! [`InMemoryCache`](crate::cache::InMemoryCache) for the thread-safe wrapper.

use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats, LruList};
use crate::config::CacheConfig;

// == Cache Store ==
/// Bounded key/value storage with LRU eviction and TTL support.
#[derive(Debug)]
pub struct CacheStore<K, V> {
    /// Entries in recency order
    entries: LruList<K, V>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_size: usize,
    /// TTL applied by `put`, None = entries never expire
    default_ttl: Option<Duration>,
    /// Whether counters are recorded at all
    statistics_enabled: bool,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates an empty store sized and timed by `config`.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            entries: LruList::with_capacity(config.max_size().min(1024)),
            stats: CacheStats::new(),
            max_size: config.max_size(),
            default_ttl: config.ttl(),
            statistics_enabled: config.statistics_enabled(),
        }
    }

    fn record(&mut self, update: impl FnOnce(&mut CacheStats)) {
        if self.statistics_enabled {
            update(&mut self.stats);
        }
    }

    // == Put ==
    /// Stores a value under the store's default TTL.
    pub fn put(&mut self, key: K, value: V) {
        self.insert(key, CacheEntry::new(value, self.default_ttl));
    }

    /// Stores a value with an explicit TTL. A zero TTL never expires.
    pub fn put_with_ttl(&mut self, key: K, value: V, ttl: Duration) {
        self.insert(key, CacheEntry::new(value, Some(ttl)));
    }

    /// Inserts or replaces `key`, then evicts the least recently used entry
    /// if the store grew past its max size. The entry just written is the
    /// most recently used one, so it is never the eviction victim.
    fn insert(&mut self, key: K, entry: CacheEntry<V>) {
        self.entries.insert(key, entry);
        self.record(CacheStats::record_put);

        while self.entries.len() > self.max_size {
            if self.entries.pop_lru().is_none() {
                break;
            }
            self.record(CacheStats::record_eviction);
        }
    }

    // == Get ==
    /// Retrieves a live value and marks it most recently used.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        match self.entries.peek(key).map(CacheEntry::is_expired) {
            None => {
                self.record(CacheStats::record_miss);
                None
            }
            Some(true) => {
                self.entries.remove(key);
                self.record(|stats| {
                    stats.record_miss();
                    stats.record_removals(1);
                });
                None
            }
            Some(false) => {
                self.entries.touch(key);
                self.record(CacheStats::record_hit);
                self.entries.peek(key).map(|entry| entry.value.clone())
            }
        }
    }

    // == Remove ==
    /// Removes `key`. Returns whether an entry was removed.
    pub fn remove(&mut self, key: &K) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.record(|stats| stats.record_removals(1));
        }
        removed
    }

    // == Clear ==
    /// Removes every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // == Contains ==
    /// Whether `key` maps to a live value. Expired entries count as absent
    /// but are left in place for `get` or the sweep to reclaim.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries
            .peek(key)
            .map_or(false, |entry| !entry.is_expired())
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let removed = self.entries.remove_expired(Instant::now());
        if removed > 0 {
            self.record(|stats| stats.record_removals(removed as u64));
        }
        removed
    }

    // == Stats ==
    /// Returns a copy of the current counters.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    // == Length ==
    /// Number of stored entries, including expired ones not yet reclaimed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<K> {
        self.entries.keys()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn store(max_size: usize) -> CacheStore<&'static str, String> {
        let config = CacheConfig::builder()
            .max_size(max_size)
            .unwrap()
            .expiration_minutes(5)
            .unwrap()
            .build();
        CacheStore::new(&config)
    }

    #[test]
    fn test_store_new() {
        let store = store(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.max_size(), 100);
        assert_eq!(store.default_ttl(), Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = store(100);

        store.put("key1", "value1".to_string());

        assert_eq!(store.get(&"key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = store(100);

        assert_eq!(store.get(&"nonexistent"), None);
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_remove() {
        let mut store = store(100);

        store.put("key1", "value1".to_string());

        assert!(store.remove(&"key1"));
        assert!(store.is_empty());
        assert_eq!(store.get(&"key1"), None);
        assert_eq!(store.stats().removals, 1);
    }

    #[test]
    fn test_store_remove_nonexistent() {
        let mut store = store(100);

        assert!(!store.remove(&"nonexistent"));
        assert_eq!(store.stats().removals, 0);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = store(100);

        store.put("key1", "value1".to_string());
        store.put("key1", "value2".to_string());

        assert_eq!(store.get(&"key1"), Some("value2".to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().puts, 2);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = store(100);

        store.put_with_ttl("key1", "value1".to_string(), Duration::from_millis(30));
        assert!(store.get(&"key1").is_some());

        sleep(Duration::from_millis(50));

        assert_eq!(store.get(&"key1"), None);
        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.removals, 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_zero_ttl_never_expires() {
        let mut store = store(100);

        store.put_with_ttl("key1", "value1".to_string(), Duration::ZERO);
        sleep(Duration::from_millis(20));

        assert_eq!(store.get(&"key1"), Some("value1".to_string()));
        assert_eq!(store.cleanup_expired(), 0);
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = store(3);

        store.put("key1", "value1".to_string());
        store.put("key2", "value2".to_string());
        store.put("key3", "value3".to_string());

        // Cache is full, adding key4 should evict key1 (oldest)
        store.put("key4", "value4".to_string());

        assert_eq!(store.len(), 3);
        assert_eq!(store.stats().evictions, 1);
        assert_eq!(store.get(&"key1"), None);
        assert!(store.get(&"key2").is_some());
        assert!(store.get(&"key3").is_some());
        assert!(store.get(&"key4").is_some());
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = store(3);

        store.put("key1", "value1".to_string());
        store.put("key2", "value2".to_string());
        store.put("key3", "value3".to_string());

        // Access key1 to make it most recently used
        store.get(&"key1");

        // Adding key4 should evict key2 (now oldest)
        store.put("key4", "value4".to_string());

        assert!(store.get(&"key1").is_some());
        assert_eq!(store.get(&"key2"), None);
    }

    #[test]
    fn test_store_overwrite_at_capacity_does_not_evict() {
        let mut store = store(2);

        store.put("a", "1".to_string());
        store.put("b", "2".to_string());
        store.put("a", "3".to_string());

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
        assert_eq!(store.keys(), vec!["a", "b"]);
    }

    #[test]
    fn test_store_single_slot() {
        let mut store = store(1);

        store.put("a", "1".to_string());
        store.put("b", "2".to_string());

        assert_eq!(store.keys(), vec!["b"]);
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_contains_key_does_not_purge() {
        let mut store = store(10);

        store.put_with_ttl("short", "v".to_string(), Duration::from_millis(10));
        assert!(store.contains_key(&"short"));

        sleep(Duration::from_millis(30));

        assert!(!store.contains_key(&"short"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().removals, 0);
    }

    #[test]
    fn test_store_stats() {
        let mut store = store(100);

        store.put("key1", "value1".to_string());
        store.get(&"key1"); // hit
        store.get(&"nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.puts, 1);
        assert_eq!(stats.hit_rate(), 50.0);
    }

    #[test]
    fn test_store_statistics_disabled() {
        let config = CacheConfig::builder().enable_statistics(false).build();
        let mut store: CacheStore<&str, u32> = CacheStore::new(&config);

        store.put("a", 1);
        store.get(&"a");
        store.get(&"b");
        store.remove(&"a");

        assert_eq!(store.stats(), CacheStats::default());
    }

    #[test]
    fn test_clear_keeps_stats() {
        let mut store = store(10);

        store.put("a", "1".to_string());
        store.get(&"a");
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.stats().hits, 1);

        store.reset_stats();
        assert_eq!(store.stats(), CacheStats::default());
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = store(100);

        store.put_with_ttl("key1", "value1".to_string(), Duration::from_millis(20));
        store.put_with_ttl("key2", "value2".to_string(), Duration::from_secs(10));

        sleep(Duration::from_millis(40));

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().removals, 1);
        assert!(store.get(&"key2").is_some());
    }
}
