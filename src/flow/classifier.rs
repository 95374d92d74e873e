//! Edge activation for the energy-flow schematic.

use super::types::{EdgeActivationSet, TelemetrySnapshot};

/// Magnitude (kW) a flow must strictly exceed to count as active.
///
/// Shared by every edge; suppresses flicker from sensor noise near zero.
pub const ACTIVATION_THRESHOLD: f64 = 0.1;

/// Returns whether a flow of `magnitude_kw` is above the activation threshold.
pub fn is_active(magnitude_kw: f64) -> bool {
    magnitude_kw > ACTIVATION_THRESHOLD
}

/// Maps a snapshot to the activation state of all six flow edges.
///
/// Solar and wind edges follow production alone, whether or not that
/// production actually reaches the home. Grid and battery edges follow the
/// decision engine's allocation. No energy-balance check is performed, and
/// charge/discharge (or import/export) pairs are evaluated independently.
///
/// # Examples
///
/// ```
/// use synapse_flow::flow::classifier::classify_flows;
/// use synapse_flow::flow::types::{DecisionOutput, TelemetrySnapshot};
///
/// let snap = TelemetrySnapshot {
///     solar_kw: 3.0,
///     home_demand_kw: 2.0,
///     decision: DecisionOutput { power_to_grid: 1.0, ..DecisionOutput::default() },
///     ..TelemetrySnapshot::default()
/// };
/// let edges = classify_flows(&snap);
/// assert!(edges.solar_to_home && edges.home_to_grid);
/// assert!(!edges.grid_to_home);
/// ```
pub fn classify_flows(snapshot: &TelemetrySnapshot) -> EdgeActivationSet {
    let d = &snapshot.decision;
    EdgeActivationSet {
        solar_to_home: is_active(snapshot.solar_kw),
        wind_to_home: is_active(snapshot.wind_kw),
        grid_to_home: is_active(d.power_from_grid),
        home_to_grid: is_active(d.power_to_grid),
        home_to_battery: is_active(d.power_to_battery),
        battery_to_home: is_active(d.power_from_battery),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::types::{DecisionOutput, Edge};

    #[test]
    fn threshold_is_strict() {
        assert!(!is_active(0.0));
        assert!(!is_active(ACTIVATION_THRESHOLD));
        assert!(is_active(0.100_001));
    }

    #[test]
    fn idle_snapshot_has_no_active_edges() {
        let edges = classify_flows(&TelemetrySnapshot::default());
        assert_eq!(edges.active_edges().count(), 0);
    }

    #[test]
    fn small_solar_is_suppressed() {
        // 0.05 kW is below the 0.1 kW threshold
        let snap = TelemetrySnapshot {
            solar_kw: 0.05,
            home_demand_kw: 1.0,
            ..TelemetrySnapshot::default()
        };
        assert!(!classify_flows(&snap).solar_to_home);
    }

    #[test]
    fn production_activates_source_edges_even_when_diverted() {
        // All production goes to the battery, none reaches the home
        let snap = TelemetrySnapshot {
            solar_kw: 2.0,
            wind_kw: 1.0,
            home_demand_kw: 0.0,
            battery_level_pct: 40.0,
            decision: DecisionOutput {
                power_to_battery: 3.0,
                ..DecisionOutput::default()
            },
        };
        let edges = classify_flows(&snap);
        assert!(edges.solar_to_home);
        assert!(edges.wind_to_home);
        assert!(edges.home_to_battery);
        assert!(!edges.battery_to_home);
    }

    #[test]
    fn grid_import_only() {
        let snap = TelemetrySnapshot {
            home_demand_kw: 5.0,
            decision: DecisionOutput {
                power_from_grid: 5.0,
                ..DecisionOutput::default()
            },
            ..TelemetrySnapshot::default()
        };
        let active: Vec<Edge> = classify_flows(&snap).active_edges().collect();
        assert_eq!(active, vec![Edge::GridToHome]);
    }

    #[test]
    fn conflicting_battery_flows_are_both_reported() {
        let snap = TelemetrySnapshot {
            decision: DecisionOutput {
                power_to_battery: 1.0,
                power_from_battery: 1.0,
                power_from_grid: 0.5,
                power_to_grid: 0.5,
                ..DecisionOutput::default()
            },
            ..TelemetrySnapshot::default()
        };
        let edges = classify_flows(&snap);
        assert!(edges.home_to_battery && edges.battery_to_home);
        assert!(edges.grid_to_home && edges.home_to_grid);
    }

    #[test]
    fn power_to_home_does_not_drive_any_edge() {
        let snap = TelemetrySnapshot {
            decision: DecisionOutput {
                power_to_home: 4.0,
                ..DecisionOutput::default()
            },
            ..TelemetrySnapshot::default()
        };
        assert_eq!(classify_flows(&snap), EdgeActivationSet::default());
    }
}
