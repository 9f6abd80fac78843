//! In-Memory Cache Module
//!
//! Thread-safe cache built from a [`CacheStore`] behind a single mutex.
//!
//! Every operation, reads included, takes the same lock: a lookup reorders
//! the recency list and bumps counters, and an expired hit removes the entry,
//! so there is no read path that leaves the store untouched.

use std::hash::Hash;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{CacheService, CacheStats, CacheStore, ManagedCache};
use crate::config::CacheConfig;
use crate::error::Result;

// == In-Memory Cache ==
/// Bounded, LRU-ordered, TTL-expiring cache safe to share between threads.
///
/// Share it by wrapping in an `Arc`; the manager holds caches the same way.
#[derive(Debug)]
pub struct InMemoryCache<K, V> {
    store: Mutex<CacheStore<K, V>>,
    config: CacheConfig,
}

impl<K, V> InMemoryCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    // == Constructor ==
    pub fn new(config: CacheConfig) -> Self {
        Self {
            store: Mutex::new(CacheStore::new(&config)),
            config,
        }
    }

    /// Creates a cache with the given bound and default TTL, other settings
    /// at their defaults. `Duration::ZERO` disables expiry.
    pub fn with_capacity(max_size: usize, default_ttl: Duration) -> Result<Self> {
        let millis = u64::try_from(default_ttl.as_millis()).unwrap_or(u64::MAX);
        let config = CacheConfig::builder()
            .max_size(max_size)?
            .expiration_millis(millis)?
            .build();
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.store.lock().get(key)
    }

    pub fn put(&self, key: K, value: V) {
        self.store.lock().put(key, value);
    }

    pub fn put_with_ttl(&self, key: K, value: V, ttl: Duration) {
        self.store.lock().put_with_ttl(key, value, ttl);
    }

    pub fn remove(&self, key: &K) -> bool {
        self.store.lock().remove(key)
    }

    pub fn clear(&self) {
        self.store.lock().clear();
    }

    pub fn size(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.store.lock().contains_key(key)
    }

    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    pub fn reset_stats(&self) {
        self.store.lock().reset_stats();
    }

    pub fn cleanup_expired(&self) -> usize {
        self.store.lock().cleanup_expired()
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> Vec<K> {
        self.store.lock().keys()
    }
}

impl<K, V> CacheService<K, V> for InMemoryCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Option<V> {
        InMemoryCache::get(self, key)
    }

    fn put(&self, key: K, value: V) {
        InMemoryCache::put(self, key, value)
    }

    fn put_with_ttl(&self, key: K, value: V, ttl: Duration) {
        InMemoryCache::put_with_ttl(self, key, value, ttl)
    }

    fn remove(&self, key: &K) -> bool {
        InMemoryCache::remove(self, key)
    }

    fn clear(&self) {
        InMemoryCache::clear(self)
    }

    fn size(&self) -> usize {
        InMemoryCache::size(self)
    }

    fn is_empty(&self) -> bool {
        InMemoryCache::is_empty(self)
    }

    fn contains_key(&self, key: &K) -> bool {
        InMemoryCache::contains_key(self, key)
    }

    fn stats(&self) -> CacheStats {
        InMemoryCache::stats(self)
    }

    fn reset_stats(&self) {
        InMemoryCache::reset_stats(self)
    }

    fn cleanup_expired(&self) -> usize {
        InMemoryCache::cleanup_expired(self)
    }
}

impl<K, V> ManagedCache for InMemoryCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
{
    fn clear(&self) {
        InMemoryCache::clear(self)
    }

    fn size(&self) -> usize {
        InMemoryCache::size(self)
    }

    fn max_size(&self) -> usize {
        self.config.max_size()
    }

    fn cleanup_expired(&self) -> usize {
        InMemoryCache::cleanup_expired(self)
    }

    fn stats(&self) -> CacheStats {
        InMemoryCache::stats(self)
    }

    fn reset_stats(&self) {
        InMemoryCache::reset_stats(self)
    }

    fn cleanup_enabled(&self) -> bool {
        self.config.cleanup_enabled()
    }
}
