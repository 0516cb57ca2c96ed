//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::constants::APP_VERSION;
use crate::inference::ArtifactInfo;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    model: Option<ArtifactInfo>,
    scaler: Option<ArtifactInfo>,
}

/// Liveness plus artifact status. Always 200; degraded mode shows in `status`.
pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: if state.predictor.is_ready() { "healthy" } else { "degraded" },
        version: APP_VERSION,
        timestamp: chrono::Utc::now().timestamp(),
        model: state.artifacts.model.clone(),
        scaler: state.artifacts.scaler.clone(),
    })
}
