use ludex::domain::{AppId, CacheStats, DetailMap};
use ludex::LibraryReport;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GamesResponse {
    pub total_games: usize,
    pub resolved_games: usize,
    pub failed_games: usize,
    pub games: DetailMap,
}

impl From<LibraryReport> for GamesResponse {
    fn from(report: LibraryReport) -> Self {
        Self {
            total_games: report.total_games,
            resolved_games: report.resolved_games(),
            failed_games: report.failed_games(),
            games: report.games,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    pub count: usize,
    pub ttl_hours: f64,
    pub keys: Vec<AppId>,
}

impl From<CacheStats<AppId>> for CacheStatsResponse {
    fn from(stats: CacheStats<AppId>) -> Self {
        let ttl_hours = stats.ttl_hours();
        let mut keys = stats.keys;
        keys.sort_unstable();
        Self {
            count: stats.count,
            ttl_hours,
            keys,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub cleared: bool,
    pub message: String,
}

// Error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_games: Option<usize>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            total_games: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
