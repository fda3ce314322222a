use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{HeaderValue, Method},
    routing::{delete, get},
    Router,
};
use shared::config::Config;
use shared::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build and configure the application router
pub fn build_router(state: AppState, config: &Config) -> shared::Result<Router> {
    Ok(Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Player and library routes
        .route("/user", get(handlers::player_summary))
        .route("/games", get(handlers::owned_games))
        .route("/recentlyPlayedGames", get(handlers::recently_played_games))
        // Cache administration
        .route("/cache", delete(handlers::clear_cache))
        .route("/cache/stats", get(handlers::cache_stats))
        .fallback(handlers::not_found)
        // Middleware
        .layer(cors_layer(config)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn cors_layer(config: &Config) -> shared::Result<CorsLayer> {
    let layer = CorsLayer::new().allow_methods([Method::GET, Method::DELETE]);

    if config.allows_any_origin() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = config
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| Error::Config(format!("invalid CORS origin: {origin}")))
        })
        .collect::<shared::Result<Vec<_>>>()?;

    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}
