//! API Routes
//!
//! Configures the Axum router with all administrative endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cleanup_handler, clear_all_handler, clear_handler, health_handler, report_handler,
    reset_stats_handler, AppState,
};

/// Creates the admin router.
///
/// # Endpoints
/// - `GET /caches` - Report of every registered cache
/// - `DELETE /caches` - Clear every cache
/// - `DELETE /caches/:name` - Clear one cache
/// - `POST /caches/cleanup` - Sweep expired entries now
/// - `POST /caches/stats/reset` - Zero every cache's statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/caches", get(report_handler).delete(clear_all_handler))
        .route("/caches/cleanup", post(cleanup_handler))
        .route("/caches/stats/reset", post(reset_stats_handler))
        .route("/caches/:name", delete(clear_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
