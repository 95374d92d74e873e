//! JSON status payload as served by the energy-management backend.
//!
//! Only `live_data` and `decision_engine_output` are read; any other
//! top-level or nested keys (`kpi`, `tou_prices`, ...) are ignored. The
//! decision engine's `recommended_action` label is optional and passed
//! through untouched.

use serde::Deserialize;
use serde_json::Value;

use crate::error::SnapshotError;
use crate::flow::types::{DecisionOutput, TelemetrySnapshot};

/// Top-level status object.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusPayload {
    pub live_data: LiveData,
    pub decision_engine_output: DecisionEngineOutput,
}

/// Live measurements, wire naming.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveData {
    pub solar: f64,
    pub wind: f64,
    pub home_demand: f64,
    pub battery_level: f64,
}

/// Decision engine allocation, wire naming.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionEngineOutput {
    pub power_to_home: f64,
    pub power_to_battery: f64,
    pub power_from_battery: f64,
    pub power_from_grid: f64,
    pub power_to_grid: f64,
    #[serde(default)]
    pub recommended_action: Option<String>,
}

impl From<&StatusPayload> for TelemetrySnapshot {
    fn from(p: &StatusPayload) -> Self {
        let d = &p.decision_engine_output;
        Self {
            solar_kw: p.live_data.solar,
            wind_kw: p.live_data.wind,
            home_demand_kw: p.live_data.home_demand,
            battery_level_pct: p.live_data.battery_level,
            decision: DecisionOutput {
                power_to_home: d.power_to_home,
                power_to_battery: d.power_to_battery,
                power_from_battery: d.power_from_battery,
                power_from_grid: d.power_from_grid,
                power_to_grid: d.power_to_grid,
            },
        }
    }
}

/// A validated snapshot plus the decision engine's action label.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub snapshot: TelemetrySnapshot,
    pub recommended_action: Option<String>,
}

impl TryFrom<StatusPayload> for Observation {
    type Error = SnapshotError;

    fn try_from(p: StatusPayload) -> Result<Self, Self::Error> {
        let snapshot = TelemetrySnapshot::from(&p);
        snapshot.validate()?;
        Ok(Self {
            snapshot,
            recommended_action: p.decision_engine_output.recommended_action,
        })
    }
}

/// Parses and validates a single status object.
///
/// # Errors
///
/// `SnapshotError::Malformed` if the JSON is invalid or a required field is
/// missing or non-numeric; `SnapshotError::InvalidField` if a value is
/// negative or non-finite.
pub fn parse_snapshot(json: &str) -> Result<TelemetrySnapshot, SnapshotError> {
    parse_observation(json).map(|o| o.snapshot)
}

/// Like [`parse_snapshot`], keeping the `recommended_action` label.
///
/// # Errors
///
/// Same as [`parse_snapshot`].
pub fn parse_observation(json: &str) -> Result<Observation, SnapshotError> {
    let payload: StatusPayload = serde_json::from_str(json)?;
    Observation::try_from(payload)
}

/// Parses either one status object or a JSON array of them.
///
/// # Errors
///
/// Fails on the first malformed or invalid element.
pub fn parse_observations(json: &str) -> Result<Vec<Observation>, SnapshotError> {
    let value: Value = serde_json::from_str(json)?;
    let items = match value {
        Value::Array(items) => items,
        other => vec![other],
    };
    items.into_iter().map(observation_from_value).collect()
}

/// Converts an already-parsed JSON value into a validated observation.
///
/// # Errors
///
/// Same as [`parse_snapshot`].
pub fn observation_from_value(value: Value) -> Result<Observation, SnapshotError> {
    let payload: StatusPayload = serde_json::from_value(value)?;
    Observation::try_from(payload)
}
