use crate::domain::{AppId, CacheStats};

pub trait CacheAdminOperations: Send + Sync + 'static {
    fn clear_cache(&self);
    fn cache_stats(&self) -> CacheStats<AppId>;
}
