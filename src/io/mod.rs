//! Output writers.

/// CSV export of derivation records.
pub mod export;
