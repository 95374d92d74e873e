//! Core derivation types: the input snapshot, decision allocation, and edge set.

use std::fmt;

use serde::Serialize;
use tracing::warn;

use super::kpi::{grid_dependence_pct, self_sufficiency_pct};
use crate::error::SnapshotError;

/// Power allocation chosen by the external decision engine for one instant.
///
/// All quantities are non-negative magnitudes in kW along one directed edge.
///
/// Preconditions (documented, not enforced): at most one of
/// `power_to_battery` / `power_from_battery` is non-zero, and at most one of
/// `power_from_grid` / `power_to_grid` is non-zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DecisionOutput {
    /// Power routed to the home loads (kW).
    pub power_to_home: f64,
    /// Battery charging power (kW).
    pub power_to_battery: f64,
    /// Battery discharging power (kW).
    pub power_from_battery: f64,
    /// Grid import (kW).
    pub power_from_grid: f64,
    /// Grid export (kW).
    pub power_to_grid: f64,
}

/// Live measurements plus the decision engine's allocation for one poll.
///
/// # Examples
///
/// ```
/// use synapse_flow::flow::types::{DecisionOutput, TelemetrySnapshot};
///
/// let snap = TelemetrySnapshot {
///     solar_kw: 3.0,
///     wind_kw: 0.5,
///     home_demand_kw: 2.0,
///     battery_level_pct: 65.0,
///     decision: DecisionOutput::default(),
/// };
/// assert_eq!(snap.total_production_kw(), 3.5);
/// assert!(snap.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    /// Solar production (kW, >= 0).
    pub solar_kw: f64,
    /// Wind production (kW, >= 0).
    pub wind_kw: f64,
    /// Instantaneous home demand (kW, >= 0, may be zero).
    pub home_demand_kw: f64,
    /// Battery level (0–100). Informational only.
    pub battery_level_pct: f64,
    /// Decision engine allocation for this instant.
    pub decision: DecisionOutput,
}

impl TelemetrySnapshot {
    /// Combined renewable production (kW).
    pub fn total_production_kw(&self) -> f64 {
        self.solar_kw + self.wind_kw
    }

    /// Checks that every power is finite and non-negative, and that both
    /// KPI percentages come out finite.
    ///
    /// Battery level only has to be finite. Simultaneous charge/discharge or
    /// import/export is logged but accepted; both edges are evaluated
    /// independently downstream.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::InvalidField` naming the first offending field.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let d = &self.decision;
        let powers = [
            ("live_data.solar", self.solar_kw),
            ("live_data.wind", self.wind_kw),
            ("live_data.home_demand", self.home_demand_kw),
            ("decision_engine_output.power_to_home", d.power_to_home),
            ("decision_engine_output.power_to_battery", d.power_to_battery),
            (
                "decision_engine_output.power_from_battery",
                d.power_from_battery,
            ),
            ("decision_engine_output.power_from_grid", d.power_from_grid),
            ("decision_engine_output.power_to_grid", d.power_to_grid),
        ];
        for (field, value) in powers {
            check_power(field, value)?;
        }

        if !self.battery_level_pct.is_finite() {
            return Err(SnapshotError::invalid(
                "live_data.battery_level",
                format!("must be finite, got {}", self.battery_level_pct),
            ));
        }

        // Tiny demand against ordinary flows overflows the KPI ratios.
        if self.home_demand_kw > 0.0 {
            let ratios = [grid_dependence_pct(self), self_sufficiency_pct(self)];
            if ratios.iter().any(|r| !r.is_finite()) {
                return Err(SnapshotError::invalid(
                    "live_data.home_demand",
                    format!(
                        "{} kW is too small for the reported flows; KPI percentages overflow",
                        self.home_demand_kw
                    ),
                ));
            }
        }

        if d.power_to_battery > 0.0 && d.power_from_battery > 0.0 {
            warn!(
                to_battery_kw = d.power_to_battery,
                from_battery_kw = d.power_from_battery,
                "battery charging and discharging in the same snapshot"
            );
        }
        if d.power_from_grid > 0.0 && d.power_to_grid > 0.0 {
            warn!(
                from_grid_kw = d.power_from_grid,
                to_grid_kw = d.power_to_grid,
                "grid import and export in the same snapshot"
            );
        }

        Ok(())
    }
}

fn check_power(field: &'static str, value: f64) -> Result<(), SnapshotError> {
    if !value.is_finite() {
        return Err(SnapshotError::invalid(
            field,
            format!("must be finite, got {value}"),
        ));
    }
    if value < 0.0 {
        return Err(SnapshotError::invalid(
            field,
            format!("must be >= 0, got {value}"),
        ));
    }
    Ok(())
}

/// One directed path in the six-node energy-flow schematic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    SolarToHome,
    WindToHome,
    GridToHome,
    HomeToGrid,
    HomeToBattery,
    BatteryToHome,
}

impl Edge {
    /// Every edge of the schematic.
    pub const ALL: [Edge; 6] = [
        Edge::SolarToHome,
        Edge::WindToHome,
        Edge::GridToHome,
        Edge::HomeToGrid,
        Edge::HomeToBattery,
        Edge::BatteryToHome,
    ];

    /// Key used for this edge in JSON and CSV output.
    pub fn key(self) -> &'static str {
        match self {
            Edge::SolarToHome => "solar_to_home",
            Edge::WindToHome => "wind_to_home",
            Edge::GridToHome => "grid_to_home",
            Edge::HomeToGrid => "home_to_grid",
            Edge::HomeToBattery => "home_to_battery",
            Edge::BatteryToHome => "battery_to_home",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Edge::SolarToHome => "solar→home",
            Edge::WindToHome => "wind→home",
            Edge::GridToHome => "grid→home",
            Edge::HomeToGrid => "home→grid",
            Edge::HomeToBattery => "home→battery",
            Edge::BatteryToHome => "battery→home",
        };
        f.write_str(label)
    }
}

/// Activation flag for each of the six flow edges.
///
/// Field names double as the serialized keys, so the JSON object always
/// carries exactly the six edge keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EdgeActivationSet {
    pub solar_to_home: bool,
    pub wind_to_home: bool,
    pub grid_to_home: bool,
    pub home_to_grid: bool,
    pub home_to_battery: bool,
    pub battery_to_home: bool,
}

impl EdgeActivationSet {
    /// Returns whether `edge` is active.
    pub fn is_active(&self, edge: Edge) -> bool {
        match edge {
            Edge::SolarToHome => self.solar_to_home,
            Edge::WindToHome => self.wind_to_home,
            Edge::GridToHome => self.grid_to_home,
            Edge::HomeToGrid => self.home_to_grid,
            Edge::HomeToBattery => self.home_to_battery,
            Edge::BatteryToHome => self.battery_to_home,
        }
    }

    /// Active edges in `Edge::ALL` order.
    pub fn active_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        Edge::ALL.into_iter().filter(|&e| self.is_active(e))
    }
}

impl fmt::Display for EdgeActivationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for edge in self.active_edges() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{edge}")?;
            first = false;
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}
