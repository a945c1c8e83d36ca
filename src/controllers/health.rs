use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

/// What the readiness probe reports, fixed at startup
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub synthesis_configured: bool,
    pub drive_configured: bool,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(status): State<Arc<HealthStatus>>) -> impl IntoResponse {
    let storage = if status.drive_configured { "drive" } else { "local" };

    if status.synthesis_configured {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "tts": "configured",
                "storage": storage
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "tts": "missing_credentials",
                "storage": storage
            })),
        )
    }
}
