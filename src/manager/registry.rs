//! Cache Registry
//!
//! Named, type-erased cache instances shared between the manager and its
//! sweep worker.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error, info};

use crate::cache::ManagedCache;

/// Which caches a sweep visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SweepScope {
    /// Periodic sweep: skips caches whose config disables cleanup
    Scheduled,
    /// Administrative sweep: visits every cache
    Forced,
}

// == Registry ==
#[derive(Default)]
pub(crate) struct Registry {
    caches: RwLock<HashMap<String, Arc<dyn ManagedCache>>>,
}

impl Registry {
    /// Stores `cache` under `name`, replacing any earlier registration.
    pub(crate) fn insert(&self, name: String, cache: Arc<dyn ManagedCache>) {
        if self.caches.write().insert(name.clone(), cache).is_some() {
            debug!(cache = %name, "Replaced existing cache registration");
        } else {
            debug!(cache = %name, "Registered cache");
        }
    }

    pub(crate) fn remove(&self, name: &str) -> bool {
        self.caches.write().remove(name).is_some()
    }

    pub(crate) fn get(&self, name: &str) -> Option<Arc<dyn ManagedCache>> {
        self.caches.read().get(name).cloned()
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.caches.read().contains_key(name)
    }

    /// Registered caches sorted by name.
    ///
    /// The registry lock is released before the caller touches any cache, so
    /// slow cache work never blocks registration.
    pub(crate) fn snapshot(&self) -> Vec<(String, Arc<dyn ManagedCache>)> {
        let mut caches: Vec<_> = self
            .caches
            .read()
            .iter()
            .map(|(name, cache)| (name.clone(), cache.clone()))
            .collect();
        caches.sort_by(|a, b| a.0.cmp(&b.0));
        caches
    }

    // == Sweep ==
    /// Purges expired entries from each cache in scope and returns the total
    /// removed.
    ///
    /// Each cache is swept in isolation: a panic inside one is logged and
    /// the sweep moves on to the next cache.
    pub(crate) fn sweep(&self, scope: SweepScope) -> usize {
        let mut total = 0;

        for (name, cache) in self.snapshot() {
            if scope == SweepScope::Scheduled && !cache.cleanup_enabled() {
                continue;
            }

            match panic::catch_unwind(AssertUnwindSafe(|| cache.cleanup_expired())) {
                Ok(removed) => total += removed,
                Err(payload) => error!(
                    cache = %name,
                    reason = panic_message(payload.as_ref()),
                    "Cache sweep panicked, continuing with remaining caches"
                ),
            }
        }

        if total > 0 {
            info!(removed = total, "Expiry sweep removed entries");
        } else {
            debug!("Expiry sweep found no expired entries");
        }
        total
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}
