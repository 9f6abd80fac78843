//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache engine.
///
/// Cache operations themselves never fail; errors come from configuration,
/// administrative lookups on the manager and starting its sweep worker.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A configuration value was rejected at the point it was supplied
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No cache is registered under the requested name
    #[error("Cache not found: {0}")]
    NotFound(String),

    /// The background sweep worker could not be started
    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

impl CacheError {
    /// Shorthand for building an [`CacheError::InvalidArgument`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        CacheError::InvalidArgument(msg.into())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Scheduler(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_error_display() {
        let err = CacheError::invalid("maxSize must be positive");
        assert_eq!(err.to_string(), "Invalid argument: maxSize must be positive");

        let err = CacheError::NotFound("sessions".to_string());
        assert_eq!(err.to_string(), "Cache not found: sessions");
    }

    #[tokio::test]
    async fn test_error_response_status_and_body() {
        let response = CacheError::NotFound("users".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "Cache not found: users");

        let response = CacheError::invalid("bad").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
