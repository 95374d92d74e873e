//! Combined per-snapshot record: edge states, KPIs, and headline totals.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::classifier::classify_flows;
use super::kpi::{KpiPolicy, KpiResult, derive_kpis_with};
use super::power_balance::{balance_residual_kw, is_balanced};
use super::types::{EdgeActivationSet, TelemetrySnapshot};

/// Everything the presentation layer needs for one poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Derivation {
    /// Flow edge activation states.
    pub edges: EdgeActivationSet,
    /// Efficiency KPIs.
    pub kpi: KpiResult,
    /// Solar plus wind production (kW).
    pub total_production_kw: f64,
    /// Home demand (kW).
    pub home_demand_kw: f64,
    /// Battery level (0–100).
    pub battery_level_pct: f64,
    /// Decision engine's label for this allocation (e.g. `CHARGE_BATTERY`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_action: Option<String>,
    #[serde(skip)]
    snapshot: TelemetrySnapshot,
}

impl Derivation {
    /// The snapshot this record was derived from.
    pub fn snapshot(&self) -> &TelemetrySnapshot {
        &self.snapshot
    }

    /// Attaches the decision engine's action label.
    pub fn with_recommended_action(mut self, action: Option<String>) -> Self {
        self.recommended_action = action;
        self
    }
}

/// Classifies flows and derives KPIs for one snapshot.
///
/// Both halves are independent pure functions of `snapshot`.
pub fn derive(snapshot: &TelemetrySnapshot, policy: &KpiPolicy) -> Derivation {
    if !is_balanced(snapshot) {
        debug!(
            residual_kw = balance_residual_kw(snapshot),
            "decision allocation does not balance supply and demand"
        );
    }

    Derivation {
        edges: classify_flows(snapshot),
        kpi: derive_kpis_with(snapshot, policy),
        total_production_kw: snapshot.total_production_kw(),
        home_demand_kw: snapshot.home_demand_kw,
        battery_level_pct: snapshot.battery_level_pct,
        recommended_action: None,
        snapshot: *snapshot,
    }
}

impl fmt::Display for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "prod={:.2} kW  demand={:.2} kW  bat={:.1}% | {} | flows: {}",
            self.total_production_kw,
            self.home_demand_kw,
            self.battery_level_pct,
            self.kpi,
            self.edges,
        )?;

        if let Some(ref action) = self.recommended_action {
            write!(f, " | decision: {action}")?;
        }

        let d = &self.snapshot.decision;
        let actions = [
            ("charge battery", d.power_to_battery),
            ("discharge battery", d.power_from_battery),
            ("export", d.power_to_grid),
            ("import", d.power_from_grid),
        ];
        for (label, kw) in actions {
            if kw > 0.0 {
                write!(f, " ({label}: {kw:.2} kW)")?;
            }
        }
        Ok(())
    }
}
