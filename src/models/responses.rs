//! Response DTOs for the admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for administrative actions that only report what they did
/// (clear one cache, clear all caches, reset statistics).
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Human readable outcome
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn cleared(name: &str) -> Self {
        Self::new(format!("Cache '{}' cleared", name))
    }
}

/// Response body for a forced sweep (POST /caches/cleanup)
#[derive(Debug, Clone, Serialize)]
pub struct CleanupResponse {
    /// Expired entries removed across all caches
    pub removed: usize,
    /// Entries remaining across all caches
    pub total_size: usize,
}

impl CleanupResponse {
    pub fn new(removed: usize, total_size: usize) -> Self {
        Self {
            removed,
            total_size,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Whether the expiry sweeper is running
    pub sweeper_running: bool,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(sweeper_running: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            sweeper_running,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
