//! Cache Engine - generic in-process caching
//!
//! Thread-safe, size-bounded caches with TTL expiry, LRU eviction and
//! per-instance statistics, plus a process-wide manager that registers
//! caches by name, sweeps expired entries in the background and reports
//! on all of them.
//!
//! ```ignore
//! use std::sync::Arc;
//! use cache_engine::{CacheConfig, CacheManager, InMemoryCache};
//!
//! let config = CacheConfig::builder()
//!     .max_size(500)?
//!     .expiration_seconds(30)?
//!     .build();
//! let posts: Arc<InMemoryCache<u64, String>> = Arc::new(InMemoryCache::new(config));
//!
//! let manager = CacheManager::global();
//! manager.register_cache("posts", posts.clone());
//! manager.start(1)?;
//!
//! posts.put(1, "hello".to_string());
//! assert_eq!(posts.get(&1), Some("hello".to_string()));
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod manager;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheService, CacheStats, InMemoryCache, ManagedCache};
pub use config::{AdminConfig, CacheConfig, CacheConfigBuilder, TimeUnit};
pub use error::{CacheError, Result};
pub use manager::{CacheManager, CacheReport, ManagerReport};
