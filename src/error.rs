//! Error types for snapshot parsing and validation.

use thiserror::Error;

/// A telemetry snapshot that cannot be turned into flow states or KPIs.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The payload is not valid JSON or is missing a required numeric field.
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
    /// A field is present but holds a value the derivation cannot use.
    #[error("invalid snapshot field `{field}`: {reason}")]
    InvalidField {
        /// Wire path of the offending field (e.g. `live_data.solar`).
        field: &'static str,
        /// Human-readable description of the violated constraint.
        reason: String,
    },
}

impl SnapshotError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
