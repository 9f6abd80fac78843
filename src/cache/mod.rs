//! Cache Module
//!
//! Provides in-memory caching with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod memory;
mod service;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruList;
pub use memory::InMemoryCache;
pub use service::{CacheService, ManagedCache};
pub use stats::CacheStats;
pub use store::CacheStore;
