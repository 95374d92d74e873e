//! Worked examples through the wire format: JSON in, edge states and KPIs out.

mod common;

use synapse_flow::flow::types::Edge;
use synapse_flow::flow::{KpiValue, classify_flows, derive_kpis};
use synapse_flow::wire::parse_snapshot;

use common::{snapshot, status_json};

fn active(json: &str) -> Vec<Edge> {
    let snap = parse_snapshot(json).expect("snapshot should parse");
    classify_flows(&snap).active_edges().collect()
}

#[test]
fn surplus_export_is_fully_self_sufficient() {
    // own = 3 - 0 - 1 + 0 = 2 kW for 2 kW demand
    let json = status_json(&snapshot(3.0, 0.0, 2.0, (0.0, 1.0, 0.0, 0.0)));
    let snap = parse_snapshot(&json).expect("snapshot should parse");

    let kpi = derive_kpis(&snap);
    assert_eq!(kpi.self_sufficiency, KpiValue::Percent(100.0));
    assert_eq!(kpi.grid_dependence, KpiValue::Percent(0.0));
    assert_eq!(active(&json), vec![Edge::SolarToHome, Edge::HomeToGrid]);
}

#[test]
fn full_grid_import() {
    let json = status_json(&snapshot(0.0, 0.0, 5.0, (5.0, 0.0, 0.0, 0.0)));
    let snap = parse_snapshot(&json).expect("snapshot should parse");

    let kpi = derive_kpis(&snap);
    assert_eq!(kpi.grid_dependence, KpiValue::Percent(100.0));
    assert_eq!(kpi.self_sufficiency, KpiValue::Percent(0.0));
    assert_eq!(active(&json), vec![Edge::GridToHome]);
}

#[test]
fn sub_threshold_solar_is_inactive() {
    let json = status_json(&snapshot(0.05, 0.0, 1.0, (0.0, 0.0, 0.0, 0.0)));
    assert!(!active(&json).contains(&Edge::SolarToHome));
}

#[test]
fn zero_demand_ignores_decision_values() {
    for decision in [
        (0.0, 0.0, 0.0, 0.0),
        (3.0, 0.0, 0.0, 2.0),
        (0.0, 4.0, 6.0, 0.0),
    ] {
        let snap = snapshot(7.5, 2.0, 0.0, decision);
        let kpi = derive_kpis(&snap);
        assert_eq!(kpi.grid_dependence, KpiValue::Percent(0.0));
        assert_eq!(kpi.self_sufficiency, KpiValue::Percent(100.0));
    }
}

#[test]
fn wind_and_battery_cover_demand() {
    let json = status_json(&snapshot(0.0, 1.0, 3.0, (0.0, 0.0, 0.0, 2.0)));
    let snap = parse_snapshot(&json).expect("snapshot should parse");
    assert_eq!(derive_kpis(&snap).self_sufficiency, KpiValue::Percent(100.0));
    assert_eq!(active(&json), vec![Edge::WindToHome, Edge::BatteryToHome]);
}
