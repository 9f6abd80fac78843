//! Cache Manager Module
//!
//! Process-wide registry of named caches with a background expiry sweeper
//! and administrative operations over every registered cache.
//!
//! [`CacheManager::global`] hands out the single per-process instance. Code
//! that needs a manager should take an `Arc<CacheManager>` from its caller
//! rather than reaching for the global, so tests can hand it an independent
//! [`CacheManager::new`].

mod registry;
mod report;

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::cache::ManagedCache;
use crate::error::{CacheError, Result};
use crate::tasks::{spawn_sweeper, Sweeper};

use registry::{Registry, SweepScope};
pub use report::{CacheReport, ManagerReport};

/// How long `stop` waits for an in-flight sweep before detaching the worker.
pub const DEFAULT_STOP_GRACE: Duration = Duration::from_secs(5);

static GLOBAL: Lazy<Arc<CacheManager>> = Lazy::new(|| Arc::new(CacheManager::new()));

// == Cache Manager ==
/// Registry of named caches plus the scheduler that sweeps them.
///
/// States: stopped (initial) and running. `start` and `stop` are idempotent
/// and may be called from any thread.
pub struct CacheManager {
    registry: Arc<Registry>,
    sweeper: Mutex<Option<Sweeper>>,
}

impl CacheManager {
    // == Constructor ==
    /// Creates an independent, stopped manager with an empty registry.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry::default()),
            sweeper: Mutex::new(None),
        }
    }

    /// Handle to the process-wide manager, created on first access.
    pub fn global() -> Arc<CacheManager> {
        GLOBAL.clone()
    }

    // == Lifecycle ==
    /// Starts sweeping registered caches every `interval_minutes`.
    ///
    /// No-op when already running.
    pub fn start(&self, interval_minutes: u64) -> Result<()> {
        if interval_minutes == 0 {
            return Err(CacheError::invalid(
                "sweep interval must be greater than 0 minutes",
            ));
        }
        self.start_with_period(Duration::from_secs(interval_minutes.saturating_mul(60)))
    }

    /// Starts sweeping registered caches every `period`.
    ///
    /// No-op when already running.
    pub fn start_with_period(&self, period: Duration) -> Result<()> {
        if period.is_zero() {
            return Err(CacheError::invalid("sweep period must be non-zero"));
        }

        let mut sweeper = self.sweeper.lock();
        if sweeper.is_some() {
            debug!("Cache manager already running");
            return Ok(());
        }

        let registry = self.registry.clone();
        let worker = spawn_sweeper(period, move || {
            registry.sweep(SweepScope::Scheduled);
        })
        .map_err(|e| CacheError::Scheduler(e.to_string()))?;

        *sweeper = Some(worker);
        info!(period_ms = period.as_millis() as u64, "Cache manager started");
        Ok(())
    }

    /// Stops the scheduler, waiting up to [`DEFAULT_STOP_GRACE`] for a
    /// sweep in progress. Registered caches are kept. No-op when stopped.
    pub fn stop(&self) {
        self.stop_with_grace(DEFAULT_STOP_GRACE);
    }

    /// Like [`stop`](Self::stop) with an explicit grace period.
    pub fn stop_with_grace(&self, grace: Duration) {
        // Taken out first so the wait happens without holding the lock.
        let Some(sweeper) = self.sweeper.lock().take() else {
            return;
        };

        let finished = sweeper.stop(grace);
        info!(finished, "Cache manager stopped");
    }

    pub fn is_running(&self) -> bool {
        self.sweeper.lock().is_some()
    }

    /// Interval between scheduled sweeps, `None` while stopped.
    pub fn sweep_period(&self) -> Option<Duration> {
        self.sweeper.lock().as_ref().map(Sweeper::period)
    }

    // == Registry ==
    /// Registers `cache` under `name`. An existing registration under the
    /// same name is replaced.
    pub fn register_cache<C>(&self, name: impl Into<String>, cache: Arc<C>)
    where
        C: ManagedCache + 'static,
    {
        self.registry.insert(name.into(), cache);
    }

    /// Removes the registration under `name`. Returns whether one existed.
    pub fn unregister_cache(&self, name: &str) -> bool {
        self.registry.remove(name)
    }

    pub fn contains_cache(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Registered names in sorted order.
    pub fn cache_names(&self) -> Vec<String> {
        self.registry
            .snapshot()
            .into_iter()
            .map(|(name, _)| name)
            .collect()
    }

    // == Administration ==
    /// Clears the cache registered under `name`.
    pub fn clear(&self, name: &str) -> Result<()> {
        let cache = self
            .registry
            .get(name)
            .ok_or_else(|| CacheError::NotFound(name.to_string()))?;
        cache.clear();
        debug!(cache = %name, "Cleared cache");
        Ok(())
    }

    /// Clears every registered cache.
    pub fn clear_all(&self) {
        for (_, cache) in self.registry.snapshot() {
            cache.clear();
        }
        debug!("Cleared all caches");
    }

    /// Total entries across every registered cache.
    pub fn size(&self) -> usize {
        self.registry
            .snapshot()
            .iter()
            .map(|(_, cache)| cache.size())
            .sum()
    }

    /// Sweeps every registered cache now, regardless of its cleanup toggle,
    /// and returns the total number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        self.registry.sweep(SweepScope::Forced)
    }

    /// Zeroes the statistics of every registered cache.
    pub fn reset_all_stats(&self) {
        for (_, cache) in self.registry.snapshot() {
            cache.reset_stats();
        }
    }

    // == Reporting ==
    pub fn report(&self) -> ManagerReport {
        let caches: Vec<CacheReport> = self
            .registry
            .snapshot()
            .into_iter()
            .map(|(name, cache)| {
                let stats = cache.stats();
                CacheReport {
                    name,
                    size: cache.size(),
                    max_size: cache.max_size(),
                    hit_rate: stats.hit_rate(),
                    stats,
                }
            })
            .collect();

        let sweep_period = self.sweep_period();
        ManagerReport {
            running: sweep_period.is_some(),
            sweep_period_ms: sweep_period.map(|period| period.as_millis() as u64),
            total_size: caches.iter().map(|c| c.size).sum(),
            caches,
        }
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CacheManager {
    fn drop(&mut self) {
        self.stop();
    }
}
