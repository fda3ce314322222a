use ludex::domain::{AppId, DetailRecord};
use ludex::planes::data::DetailAggregator;
use ludex::ports::{DetailCache, DetailSource, LibrarySource};
use ludex::upstream::SteamClient;
use ludex::{CacheAdminService, LibraryService};
use shared::config::Config;
use std::sync::Arc;
use std::time::Instant;
use storage_engine::TtlCache;

/// Server state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<LibraryService>,
    pub cache_admin: Arc<CacheAdminService>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        library_source: Arc<dyn LibrarySource>,
        detail_source: Arc<dyn DetailSource>,
        cache: Arc<dyn DetailCache<AppId, DetailRecord>>,
        fetch_concurrency: usize,
    ) -> Self {
        let aggregator =
            DetailAggregator::with_max_in_flight(cache.clone(), detail_source, fetch_concurrency);

        Self {
            library: Arc::new(LibraryService::new(library_source, Arc::new(aggregator))),
            cache_admin: Arc::new(CacheAdminService::new(cache)),
            started_at: Instant::now(),
        }
    }

    /// Wire the Steam client and a TTL cache from configuration
    pub fn from_config(config: &Config) -> shared::Result<Self> {
        let steam = Arc::new(SteamClient::new(config.steam.clone())?);
        let cache = Arc::new(TtlCache::<AppId, DetailRecord>::new(config.cache_ttl));

        tracing::info!(
            "Detail cache ready (ttl={}h, max in-flight fetches={})",
            cache.ttl().as_secs() / 3600,
            config.fetch_concurrency
        );

        Ok(Self::new(
            steam.clone(),
            steam,
            cache,
            config.fetch_concurrency,
        ))
    }
}
