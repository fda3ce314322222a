use crate::domain::{AppId, CacheStats, DetailRecord};
use crate::planes::control::operation::CacheAdminOperations;
use crate::ports::DetailCache;
use std::sync::Arc;
use tracing::info;

/// Administrative view over the shared detail cache
#[derive(Clone)]
pub struct CacheAdminService {
    cache: Arc<dyn DetailCache<AppId, DetailRecord>>,
}

impl CacheAdminService {
    pub fn new(cache: Arc<dyn DetailCache<AppId, DetailRecord>>) -> Self {
        Self { cache }
    }
}

impl CacheAdminOperations for CacheAdminService {
    fn clear_cache(&self) {
        let before = self.cache.stats().count;
        self.cache.clear();
        info!("Cleared detail cache ({} entries dropped)", before);
    }

    fn cache_stats(&self) -> CacheStats<AppId> {
        self.cache.stats()
    }
}
