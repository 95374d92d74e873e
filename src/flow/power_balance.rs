//! Snapshot power balance arithmetic.

use super::types::TelemetrySnapshot;

/// Largest |supply - sinks| (kW) still treated as a balanced allocation.
pub const BALANCE_TOLERANCE_KW: f64 = 0.01;

/// Own generation that reaches the home, in kW.
///
/// Production that did not leave toward the battery or grid, plus whatever
/// the battery contributed back:
/// `(solar + wind) - to_battery - to_grid + from_battery`.
///
/// # Arguments
///
/// * `snapshot` - Live measurements and decision allocation
///
/// # Returns
///
/// Own-source supply to the home (kW). May be negative if the decision
/// engine's allocation exceeds production.
pub fn own_source_to_home_kw(snapshot: &TelemetrySnapshot) -> f64 {
    let d = &snapshot.decision;
    snapshot.total_production_kw() - d.power_to_battery - d.power_to_grid + d.power_from_battery
}

/// Supply minus sinks for one snapshot, in kW.
///
/// Supply is `solar + wind + from_battery + from_grid`; sinks are
/// `demand + to_battery + to_grid`. Zero for a perfectly balanced
/// allocation. Diagnostic only: neither the classifier nor the KPI
/// derivation consults it.
pub fn balance_residual_kw(snapshot: &TelemetrySnapshot) -> f64 {
    let d = &snapshot.decision;
    let supply = snapshot.total_production_kw() + d.power_from_battery + d.power_from_grid;
    let sinks = snapshot.home_demand_kw + d.power_to_battery + d.power_to_grid;
    supply - sinks
}

/// Whether supply and sinks agree within [`BALANCE_TOLERANCE_KW`].
pub fn is_balanced(snapshot: &TelemetrySnapshot) -> bool {
    balance_residual_kw(snapshot).abs() <= BALANCE_TOLERANCE_KW
}
