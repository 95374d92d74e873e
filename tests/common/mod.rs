//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use synapse_flow::flow::types::{DecisionOutput, TelemetrySnapshot};

/// Builds a snapshot from live values and a `(from_grid, to_grid, to_battery, from_battery)` tuple.
pub fn snapshot(
    solar: f64,
    wind: f64,
    demand: f64,
    (from_grid, to_grid, to_battery, from_battery): (f64, f64, f64, f64),
) -> TelemetrySnapshot {
    TelemetrySnapshot {
        solar_kw: solar,
        wind_kw: wind,
        home_demand_kw: demand,
        battery_level_pct: 50.0,
        decision: DecisionOutput {
            power_to_home: demand,
            power_to_battery: to_battery,
            power_from_battery: from_battery,
            power_from_grid: from_grid,
            power_to_grid: to_grid,
        },
    }
}

/// Seeded RNG so sweeps are reproducible.
pub fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Random well-formed snapshot. Respects the charge/discharge and
/// import/export exclusivity preconditions; zero values are common so the
/// zero-demand and zero-import branches are exercised.
pub fn random_snapshot(rng: &mut StdRng) -> TelemetrySnapshot {
    let kw = |rng: &mut StdRng| -> f64 {
        if rng.random_bool(0.25) {
            0.0
        } else {
            rng.random_range(0.0..8.0)
        }
    };

    let solar = kw(rng);
    let wind = kw(rng);
    let demand = kw(rng);
    let (from_grid, to_grid) = if rng.random_bool(0.5) {
        (kw(rng), 0.0)
    } else {
        (0.0, kw(rng))
    };
    let (to_battery, from_battery) = if rng.random_bool(0.5) {
        (kw(rng), 0.0)
    } else {
        (0.0, kw(rng))
    };

    TelemetrySnapshot {
        battery_level_pct: rng.random_range(0.0..=100.0),
        ..snapshot(solar, wind, demand, (from_grid, to_grid, to_battery, from_battery))
    }
}

/// Renders a snapshot in the backend's JSON status format.
pub fn status_json(s: &TelemetrySnapshot) -> String {
    let d = &s.decision;
    format!(
        r#"{{
  "live_data": {{ "solar": {}, "wind": {}, "home_demand": {}, "battery_level": {} }},
  "decision_engine_output": {{
    "power_to_home": {}, "power_to_battery": {}, "power_from_battery": {},
    "power_from_grid": {}, "power_to_grid": {}
  }}
}}"#,
        s.solar_kw,
        s.wind_kw,
        s.home_demand_kw,
        s.battery_level_pct,
        d.power_to_home,
        d.power_to_battery,
        d.power_from_battery,
        d.power_from_grid,
        d.power_to_grid
    )
}
