//! Cache Contracts
//!
//! The typed [`CacheService`] contract every cache implementation provides,
//! and the type-erased [`ManagedCache`] view the manager uses to maintain
//! caches of any key/value types side by side.

use std::time::Duration;

use crate::cache::CacheStats;
use crate::config::TimeUnit;

// == Cache Service ==
/// Generic key/value cache with TTL expiry and bounded size.
///
/// Lookups never fail: a missing or expired key is simply `None`.
pub trait CacheService<K, V>: Send + Sync {
    /// Returns the live value for `key`, if any.
    fn get(&self, key: &K) -> Option<V>;

    /// Stores `value` under the cache's default TTL.
    fn put(&self, key: K, value: V);

    /// Stores `value` with an explicit TTL; `Duration::ZERO` never expires.
    fn put_with_ttl(&self, key: K, value: V, ttl: Duration);

    /// Stores `value` with a TTL given as a count of `unit`.
    fn put_with_unit(&self, key: K, value: V, ttl: u64, unit: TimeUnit) {
        // A TTL too long to count in milliseconds is indistinguishable from forever.
        let ttl = unit.to_duration(ttl).unwrap_or(Duration::ZERO);
        self.put_with_ttl(key, value, ttl);
    }

    /// Removes `key`, returning whether a mapping was removed.
    fn remove(&self, key: &K) -> bool;

    /// Removes every mapping; statistics are kept.
    fn clear(&self);

    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Whether `key` maps to a live value, without purging expired entries.
    fn contains_key(&self, key: &K) -> bool;

    /// Snapshot of the statistics counters.
    fn stats(&self) -> CacheStats;

    fn reset_stats(&self);

    /// Removes all expired entries and returns how many were removed.
    fn cleanup_expired(&self) -> usize;
}

// == Managed Cache ==
/// Maintenance view of a cache, independent of its key and value types.
pub trait ManagedCache: Send + Sync {
    fn clear(&self);

    fn size(&self) -> usize;

    fn max_size(&self) -> usize;

    fn cleanup_expired(&self) -> usize;

    fn stats(&self) -> CacheStats;

    fn reset_stats(&self);

    /// Whether scheduled sweeps should visit this cache.
    fn cleanup_enabled(&self) -> bool {
        true
    }
}
