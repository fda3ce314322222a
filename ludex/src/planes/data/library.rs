use crate::domain::{AppId, DetailMap, OwnedGame};
use crate::planes::data::operation::DetailOperations;
use crate::ports::LibrarySource;
use shared::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Details resolved for a player's games list
#[derive(Clone, Debug, PartialEq)]
pub struct LibraryReport {
    pub total_games: usize,
    pub games: DetailMap,
}

impl LibraryReport {
    pub fn resolved_games(&self) -> usize {
        self.games.len()
    }

    pub fn failed_games(&self) -> usize {
        self.total_games.saturating_sub(self.games.len())
    }

    pub fn is_partial(&self) -> bool {
        self.games.len() < self.total_games
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LibraryOutcome {
    /// The seed list was empty; nothing to aggregate
    Empty,
    /// At least one app resolved
    Resolved(LibraryReport),
    /// Apps were listed but none could be resolved
    Unavailable { requested: usize },
}

/// Orchestrates a library lookup followed by detail aggregation
#[derive(Clone)]
pub struct LibraryService {
    library: Arc<dyn LibrarySource>,
    details: Arc<dyn DetailOperations>,
}

impl LibraryService {
    pub fn new(library: Arc<dyn LibrarySource>, details: Arc<dyn DetailOperations>) -> Self {
        Self { library, details }
    }

    pub async fn owned_library(&self) -> Result<LibraryOutcome> {
        let games = self.library.owned_games().await.inspect_err(|e| {
            error!("Failed to fetch owned games: {}", e);
        })?;
        Ok(self.aggregate(games, "owned").await)
    }

    pub async fn recently_played(&self) -> Result<LibraryOutcome> {
        let games = self.library.recently_played_games().await.inspect_err(|e| {
            error!("Failed to fetch recently played games: {}", e);
        })?;
        Ok(self.aggregate(games, "recently played").await)
    }

    pub async fn player_summary(&self) -> Result<serde_json::Value> {
        self.library.player_summary().await.inspect_err(|e| {
            error!("Failed to fetch player summary: {}", e);
        })
    }

    async fn aggregate(&self, games: Vec<OwnedGame>, label: &str) -> LibraryOutcome {
        if games.is_empty() {
            info!("No {} games listed for this player", label);
            return LibraryOutcome::Empty;
        }

        let ids: Vec<AppId> = games.iter().map(|game| game.appid).collect();
        info!("Fetching details for {} {} games...", ids.len(), label);

        let games = self.details.fetch_details(&ids).await;
        let report = LibraryReport {
            total_games: ids.len(),
            games,
        };

        if report.games.is_empty() {
            warn!(
                "None of the {} {} games could be resolved upstream",
                report.total_games, label
            );
            return LibraryOutcome::Unavailable {
                requested: report.total_games,
            };
        }

        info!(
            "Resolved details for {} of {} {} games",
            report.resolved_games(),
            report.total_games,
            label
        );
        LibraryOutcome::Resolved(report)
    }
}
