// Health / readiness endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::models::{HealthResponse, ReadinessResponse};
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.is_ready() { "ok" } else { "starting" };
    Json(HealthResponse {
        status: status.to_string(),
        version: state.config.server_version.clone(),
        app: state.config.server_name.clone(),
        backend: state.store.backend_name().to_string(),
        default_container: state.config.default_container.clone(),
        started_at: state.started_at.to_rfc3339(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let ready = state.is_ready();
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(ReadinessResponse { ready }))
}
