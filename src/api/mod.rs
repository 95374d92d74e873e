//! REST API exposing the derivation layer.
//!
//! Every endpoint takes a status payload in the request body and answers
//! with a freshly derived result; the server keeps no per-request state:
//! - `POST /flows`: edge activation set
//! - `POST /kpis`: grid dependence and self-sufficiency
//! - `POST /derive`: both, plus headline totals
//! - `GET /health`: liveness check

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tracing::info;

use crate::flow::kpi::KpiPolicy;

pub use types::ErrorResponse;

/// Immutable application state shared across all request handlers.
pub struct AppState {
    /// KPI policy applied to every request.
    pub policy: KpiPolicy,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/flows", post(handlers::post_flows))
        .route("/kpis", post(handlers::post_kpis))
        .route("/derive", post(handlers::post_derive))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
