use crate::api::{CacheStatsResponse, ClearCacheResponse};
use crate::state::AppState;
use axum::{extract::State, Json};
use ludex::planes::control::CacheAdminOperations;
use tracing::info;

/// GET /cache/stats
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    info!("CACHE_STATS");
    Json(CacheStatsResponse::from(state.cache_admin.cache_stats()))
}

/// DELETE /cache
pub async fn clear_cache(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    info!("CLEAR_CACHE");
    state.cache_admin.clear_cache();
    Json(ClearCacheResponse {
        cleared: true,
        message: "Cache cleared".into(),
    })
}
