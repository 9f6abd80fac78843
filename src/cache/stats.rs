//! Cache Statistics Module
//!
//! Tracks per-cache performance counters: hits, misses, evictions, puts and removals.

use serde::Serialize;

// == Cache Stats ==
/// Performance counters of one cache instance.
///
/// The counters are plain integers: the owning cache mutates them only while
/// holding its own lock. Reading them out through the cache yields a `Clone`
/// of this struct, so a snapshot never aliases the live counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that returned a live value
    pub hits: u64,
    /// Lookups on absent or expired keys
    pub misses: u64,
    /// Entries dropped to keep the cache within its max size
    pub evictions: u64,
    /// Insertions and replacements
    pub puts: u64,
    /// Entries removed explicitly or by expiry. An expired entry found by
    /// `get` counts here as well as in `misses`.
    pub removals: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of lookups (hits + misses).
    pub fn total_lookups(&self) -> u64 {
        self.hits + self.misses
    }

    // == Hit Rate ==
    /// Percentage of lookups that were hits, 0.0 when there were no lookups.
    pub fn hit_rate(&self) -> f64 {
        percentage(self.hits, self.total_lookups())
    }

    // == Miss Rate ==
    /// Percentage of lookups that were misses, 0.0 when there were no lookups.
    pub fn miss_rate(&self) -> f64 {
        percentage(self.misses, self.total_lookups())
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_put(&mut self) {
        self.puts += 1;
    }

    pub fn record_removals(&mut self, count: u64) {
        self.removals += count;
    }

    // == Reset ==
    /// Zeroes all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.puts, 0);
        assert_eq!(stats.removals, 0);
    }

    #[test]
    fn test_rates_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats.miss_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_all_hits() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        assert_eq!(stats.hit_rate(), 100.0);
        assert_eq!(stats.miss_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.total_lookups(), 4);
        assert!((stats.hit_rate() - 75.0).abs() < f64::EPSILON);
        assert!((stats.miss_rate() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_record_counters() {
        let mut stats = CacheStats::new();
        stats.record_eviction();
        stats.record_put();
        stats.record_put();
        stats.record_removals(3);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.puts, 2);
        assert_eq!(stats.removals, 3);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        let snapshot = stats;
        stats.record_hit();
        assert_eq!(snapshot.hits, 1);
        assert_eq!(stats.hits, 2);
    }

    #[test]
    fn test_reset() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();
        stats.record_put();
        stats.record_removals(1);
        stats.reset();
        assert_eq!(stats, CacheStats::default());
    }
}
