//! Background Tasks Module
//!
//! Contains background work that runs periodically while a manager is started.
//!
//! # Tasks
//! - Expiry sweep: purges expired entries from registered caches at a fixed period

mod sweeper;

pub use sweeper::{spawn_sweeper, Sweeper};
