//! Aggregate reporting over registered caches.

use serde::Serialize;

use crate::cache::CacheStats;

/// Point-in-time view of one registered cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheReport {
    pub name: String,
    pub size: usize,
    pub max_size: usize,
    pub stats: CacheStats,
    /// Hit percentage, 0.0 without lookups
    pub hit_rate: f64,
}

/// Point-in-time view of a manager and all of its caches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerReport {
    /// Whether the sweep scheduler is running
    pub running: bool,
    /// Interval between scheduled sweeps, absent while stopped
    pub sweep_period_ms: Option<u64>,
    /// Sum of entries across every cache
    pub total_size: usize,
    /// Per-cache views sorted by name
    pub caches: Vec<CacheReport>,
}

impl ManagerReport {
    /// Counters summed across every cache.
    pub fn combined_stats(&self) -> CacheStats {
        self.caches
            .iter()
            .fold(CacheStats::default(), |mut total, cache| {
                total.hits += cache.stats.hits;
                total.misses += cache.stats.misses;
                total.evictions += cache.stats.evictions;
                total.puts += cache.stats.puts;
                total.removals += cache.stats.removals;
                total
            })
    }
}
