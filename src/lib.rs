//! Energy state derivation for a home energy-management dashboard.
//!
//! Turns a telemetry + decision snapshot into flow-edge activation states
//! and instantaneous efficiency KPIs.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod error;
/// Edge classification, KPI derivation, and their shared types.
pub mod flow;
pub mod io;
pub mod logging;
pub mod wire;
