use crate::api::{ApiError, GamesResponse};
use crate::state::AppState;
use axum::{extract::State, Json};
use ludex::LibraryOutcome;
use tracing::info;

/// GET /games
pub async fn owned_games(State(state): State<AppState>) -> Result<Json<GamesResponse>, ApiError> {
    info!("GET_GAMES");

    let outcome = state
        .library
        .owned_library()
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch games data from Steam API", e))?;

    games_response(outcome, "No games found for this user")
}

/// GET /recentlyPlayedGames
pub async fn recently_played_games(
    State(state): State<AppState>,
) -> Result<Json<GamesResponse>, ApiError> {
    info!("GET_RECENTLY_PLAYED_GAMES");

    let outcome = state.library.recently_played().await.map_err(|e| {
        ApiError::upstream("Failed to fetch recently played games from Steam API", e)
    })?;

    games_response(outcome, "No recently played games found for this user")
}

fn games_response(
    outcome: LibraryOutcome,
    empty_message: &str,
) -> Result<Json<GamesResponse>, ApiError> {
    match outcome {
        LibraryOutcome::Empty => Err(ApiError::NotFound(empty_message.to_string())),
        LibraryOutcome::Unavailable { requested } => Err(ApiError::Unavailable {
            total_games: requested,
        }),
        LibraryOutcome::Resolved(report) => Ok(Json(GamesResponse::from(report))),
    }
}
