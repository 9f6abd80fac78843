//! Response models for the admin API
//!
//! DTOs serialized into the bodies of admin HTTP responses. Cache and
//! manager reports are serialized directly from their own types.

pub mod responses;

// Re-export commonly used types
pub use responses::{CleanupResponse, ErrorResponse, HealthResponse, MessageResponse};
