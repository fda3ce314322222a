use crate::api::ApiError;
use crate::state::AppState;
use axum::{extract::State, Json};
use tracing::info;

/// GET /user
pub async fn player_summary(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    info!("GET_USER");

    state
        .library
        .player_summary()
        .await
        .map(Json)
        .map_err(|e| ApiError::upstream("Failed to fetch user data from Steam API", e))
}
