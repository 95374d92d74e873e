//! Instantaneous efficiency KPIs derived from a single snapshot.

use std::fmt;

use serde::{Serialize, Serializer};

use super::power_balance::own_source_to_home_kw;
use super::types::TelemetrySnapshot;

/// A percentage KPI, or the "not applicable" sentinel.
///
/// [`derive_kpis`] never yields `NotApplicable`: zero demand maps to fixed
/// percentages instead. The variant exists for consumers that render the
/// dashboard's `"N/A"` placeholder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KpiValue {
    /// A finite percentage.
    Percent(f64),
    /// No meaningful value for this snapshot.
    NotApplicable,
}

impl KpiValue {
    /// The percentage, if applicable.
    pub fn value(self) -> Option<f64> {
        match self {
            KpiValue::Percent(v) => Some(v),
            KpiValue::NotApplicable => None,
        }
    }
}

impl fmt::Display for KpiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KpiValue::Percent(v) => write!(f, "{v:.2}%"),
            KpiValue::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// Serializes as a JSON number, or the string `"N/A"`.
impl Serialize for KpiValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            KpiValue::Percent(v) => serializer.serialize_f64(*v),
            KpiValue::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

/// The two instantaneous efficiency KPIs for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KpiResult {
    /// Share of home demand met by grid import.
    #[serde(rename = "grid_dependence_pct")]
    pub grid_dependence: KpiValue,
    /// Share of home demand met without the grid.
    #[serde(rename = "self_sufficiency_pct")]
    pub self_sufficiency: KpiValue,
}

/// Options that deviate from the reference KPI behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KpiPolicy {
    /// Clamp grid dependence to at most 100% when import exceeds demand.
    pub cap_grid_dependence: bool,
}

/// Derives both KPIs using the reference (uncapped grid dependence) policy.
///
/// # Examples
///
/// ```
/// use synapse_flow::flow::kpi::{KpiValue, derive_kpis};
/// use synapse_flow::flow::types::{DecisionOutput, TelemetrySnapshot};
///
/// let snap = TelemetrySnapshot {
///     home_demand_kw: 5.0,
///     decision: DecisionOutput { power_from_grid: 5.0, ..DecisionOutput::default() },
///     ..TelemetrySnapshot::default()
/// };
/// let kpi = derive_kpis(&snap);
/// assert_eq!(kpi.grid_dependence, KpiValue::Percent(100.0));
/// assert_eq!(kpi.self_sufficiency, KpiValue::Percent(0.0));
/// ```
pub fn derive_kpis(snapshot: &TelemetrySnapshot) -> KpiResult {
    derive_kpis_with(snapshot, &KpiPolicy::default())
}

/// Derives both KPIs under the given policy.
///
/// Percentages are finite for any snapshot that passed
/// [`TelemetrySnapshot::validate`].
pub fn derive_kpis_with(snapshot: &TelemetrySnapshot, policy: &KpiPolicy) -> KpiResult {
    let mut grid_dependence = grid_dependence_pct(snapshot);
    if policy.cap_grid_dependence {
        grid_dependence = grid_dependence.min(100.0);
    }

    KpiResult {
        grid_dependence: KpiValue::Percent(grid_dependence),
        self_sufficiency: KpiValue::Percent(self_sufficiency_pct(snapshot)),
    }
}

/// Grid import as a percentage of demand; 0 when there is no demand.
///
/// Not clamped: a transient import above demand reports more than 100%.
pub fn grid_dependence_pct(snapshot: &TelemetrySnapshot) -> f64 {
    let demand = snapshot.home_demand_kw;
    if demand <= 0.0 {
        return 0.0;
    }
    snapshot.decision.power_from_grid / demand * 100.0
}

/// Self-sufficiency percentage; 100 when there is no demand.
///
/// Two branches split at exactly zero grid import:
/// - no import: own-source supply over demand, capped at 100
/// - import: demand minus import over demand, floored at 0
pub fn self_sufficiency_pct(snapshot: &TelemetrySnapshot) -> f64 {
    let demand = snapshot.home_demand_kw;
    if demand <= 0.0 {
        return 100.0;
    }

    let from_grid = snapshot.decision.power_from_grid;
    if from_grid == 0.0 {
        (own_source_to_home_kw(snapshot) / demand * 100.0).min(100.0)
    } else {
        ((demand - from_grid) / demand * 100.0).max(0.0)
    }
}

impl fmt::Display for KpiResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "grid dependence {}  self-sufficiency {}",
            self.grid_dependence, self.self_sufficiency
        )
    }
}
