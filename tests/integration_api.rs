//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use synapse_flow::api::{AppState, router};
use synapse_flow::config::AppConfig;

async fn post_fixture(config: &AppConfig, uri: &str, path: &str) -> (StatusCode, serde_json::Value) {
    let body = std::fs::read_to_string(path).expect("fixture should exist");
    let app = router(Arc::new(AppState {
        policy: config.derivation.policy(),
    }));
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::from(body))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn derive_endpoint_on_exporting_fixture() {
    let (status, json) =
        post_fixture(&AppConfig::reference(), "/derive", "fixtures/exporting.json").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["edges"]["solar_to_home"], true);
    assert_eq!(json["edges"]["home_to_grid"], true);
    assert_eq!(json["edges"]["grid_to_home"], false);
    assert_eq!(json["kpi"]["self_sufficiency_pct"], 100.0);
    assert_eq!(json["kpi"]["grid_dependence_pct"], 0.0);
    assert_eq!(json["total_production_kw"], 3.0);
    assert_eq!(json["battery_level_pct"], 65.0);
    assert_eq!(json["recommended_action"], "EXPORT_SURPLUS");
}

#[tokio::test]
async fn flows_endpoint_returns_exactly_six_keys() {
    let (status, json) =
        post_fixture(&AppConfig::reference(), "/flows", "fixtures/exporting.json").await;
    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = json
        .as_object()
        .map(|o| o.keys().map(String::as_str).collect())
        .unwrap_or_default();
    assert_eq!(keys.len(), 6);
}

#[tokio::test]
async fn invalid_fixture_is_rejected() {
    let (status, json) =
        post_fixture(&AppConfig::reference(), "/kpis", "fixtures/negative.json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        json["error"]
            .as_str()
            .is_some_and(|s| s.contains("live_data.solar"))
    );
}

#[tokio::test]
async fn hardened_config_file_caps_dependence() {
    let config = AppConfig::from_toml_file(std::path::Path::new("fixtures/hardened.toml"))
        .expect("fixture config should parse");
    let over_import = common::status_json(&common::snapshot(0.0, 0.0, 2.0, (3.0, 0.0, 0.0, 0.0)));

    let app = router(Arc::new(AppState {
        policy: config.derivation.policy(),
    }));
    let req = Request::builder()
        .method("POST")
        .uri("/kpis")
        .body(Body::from(over_import))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["grid_dependence_pct"], 100.0);
}
