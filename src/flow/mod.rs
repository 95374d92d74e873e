//! Energy state derivation: flow edge activation and efficiency KPIs.
//!
//! Every function here is a pure function of one [`types::TelemetrySnapshot`];
//! nothing is cached between calls.

/// Edge activation threshold and classifier.
pub mod classifier;
pub mod derivation;
pub mod kpi;
pub mod power_balance;
pub mod types;

pub use classifier::{ACTIVATION_THRESHOLD, classify_flows};
pub use derivation::{Derivation, derive};
pub use kpi::{KpiPolicy, KpiResult, KpiValue, derive_kpis, derive_kpis_with};
pub use types::{DecisionOutput, Edge, EdgeActivationSet, TelemetrySnapshot};
