//! API Module
//!
//! HTTP handlers and routing for the administrative REST API over a
//! [`CacheManager`](crate::manager::CacheManager).
//!
//! # Endpoints
//! - `GET /caches` - Report of every registered cache
//! - `DELETE /caches` - Clear every cache
//! - `DELETE /caches/:name` - Clear one cache
//! - `POST /caches/cleanup` - Sweep expired entries now
//! - `POST /caches/stats/reset` - Zero every cache's statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
