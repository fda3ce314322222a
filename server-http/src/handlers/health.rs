use crate::api::{ErrorResponse, HealthResponse};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use chrono::{SecondsFormat, Utc};

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".into(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

/// Fallback for unknown routes
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Route not found")))
}
