//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use super::AppState;
use super::types::{ErrorResponse, HealthResponse};
use crate::flow::classifier::classify_flows;
use crate::flow::derivation::{Derivation, derive};
use crate::flow::kpi::{KpiResult, derive_kpis_with};
use crate::flow::types::EdgeActivationSet;
use crate::wire::{Observation, parse_observation};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// `GET /health` → 200 + `{"status":"ok"}`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// `POST /flows` → 200 + `EdgeActivationSet` JSON, or 400 on a bad snapshot.
pub async fn post_flows(body: String) -> ApiResult<EdgeActivationSet> {
    let obs = observation_or_400(&body)?;
    Ok(Json(classify_flows(&obs.snapshot)))
}

/// `POST /kpis` → 200 + `KpiResult` JSON, or 400 on a bad snapshot.
pub async fn post_kpis(State(state): State<Arc<AppState>>, body: String) -> ApiResult<KpiResult> {
    let obs = observation_or_400(&body)?;
    Ok(Json(derive_kpis_with(&obs.snapshot, &state.policy)))
}

/// `POST /derive` → 200 + `Derivation` JSON, or 400 on a bad snapshot.
pub async fn post_derive(
    State(state): State<Arc<AppState>>,
    body: String,
) -> ApiResult<Derivation> {
    let obs = observation_or_400(&body)?;
    Ok(Json(
        derive(&obs.snapshot, &state.policy).with_recommended_action(obs.recommended_action),
    ))
}

fn observation_or_400(body: &str) -> Result<Observation, (StatusCode, Json<ErrorResponse>)> {
    parse_observation(body).map_err(|e| {
        warn!(error = %e, "rejected snapshot");
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::from(&e)))
    })
}
