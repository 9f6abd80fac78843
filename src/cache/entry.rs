//! Cache Entry Module
//!
//! Defines a stored value together with its absolute expiration instant.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached value and the instant after which it is stale.
///
/// Entries are replaced wholesale on every put and never mutated in place.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Expiration instant, None = never expires
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry.
    ///
    /// A `ttl` of `None` or zero produces an entry that never expires. A TTL
    /// too large to represent as an instant is treated the same way.
    pub fn new(value: V, ttl: Option<Duration>) -> Self {
        let expires_at = ttl
            .filter(|ttl| !ttl.is_zero())
            .and_then(|ttl| Instant::now().checked_add(ttl));

        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current instant is strictly past its
    /// expiration instant.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Expiry check against a caller-supplied instant, so a sweep can judge
    /// every entry against the same clock reading.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }
}
