//! API response types.

use serde::Serialize;

use crate::error::SnapshotError;

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl From<&SnapshotError> for ErrorResponse {
    fn from(e: &SnapshotError) -> Self {
        Self {
            error: e.to_string(),
        }
    }
}

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
