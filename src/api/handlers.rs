//! API Handlers
//!
//! HTTP request handlers for the administrative endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::Result;
use crate::manager::{CacheManager, ManagerReport};
use crate::models::{CleanupResponse, HealthResponse, MessageResponse};

/// Application state shared across all handlers.
///
/// Holds a handle to the manager whose caches are administered.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<CacheManager>,
}

impl AppState {
    pub fn new(manager: Arc<CacheManager>) -> Self {
        Self { manager }
    }
}

/// Handler for GET /caches
///
/// Returns per-cache sizes and statistics plus the registry total.
pub async fn report_handler(State(state): State<AppState>) -> Json<ManagerReport> {
    Json(state.manager.report())
}

/// Handler for DELETE /caches/:name
///
/// Clears one cache; unknown names are a 404.
pub async fn clear_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.manager.clear(&name)?;
    Ok(Json(MessageResponse::cleared(&name)))
}

/// Handler for DELETE /caches
pub async fn clear_all_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.manager.clear_all();
    Json(MessageResponse::new("All caches cleared"))
}

/// Handler for POST /caches/cleanup
///
/// Runs an immediate sweep over every cache.
pub async fn cleanup_handler(State(state): State<AppState>) -> Json<CleanupResponse> {
    let removed = state.manager.cleanup_expired();
    Json(CleanupResponse::new(removed, state.manager.size()))
}

/// Handler for POST /caches/stats/reset
pub async fn reset_stats_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.manager.reset_all_stats();
    Json(MessageResponse::new("Statistics reset"))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.manager.is_running()))
}
