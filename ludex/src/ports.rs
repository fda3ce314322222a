#![deny(clippy::all)]

use crate::domain::{AppId, CacheStats, DetailRecord, OwnedGame};
use async_trait::async_trait;
use shared::Result;

// Ports are the pluggable extension points for storage and upstream implementations

/// Port for the detail cache (e.g., the TTL store in storage-engine)
///
/// All operations are infallible. An expired entry must never be returned
/// from `get`; implementations drop it during that lookup.
pub trait DetailCache<K, V>: Send + Sync + 'static {
    fn get(&self, key: &K) -> Option<V>;
    fn set(&self, key: K, val: V);
    fn clear(&self);
    fn stats(&self) -> CacheStats<K>;
}

/// Port for looking up a single app's details upstream
#[async_trait]
pub trait DetailSource: Send + Sync + 'static {
    /// Fetch details for one app. Transport failures, non-OK statuses and
    /// payloads without a truthy success flag are all errors.
    async fn fetch_detail(&self, id: AppId) -> Result<DetailRecord>;
}

/// Port for the player-scoped library lookups that seed an aggregation
#[async_trait]
pub trait LibrarySource: Send + Sync + 'static {
    /// An absent or empty games list is `Ok(vec![])`, not an error.
    async fn owned_games(&self) -> Result<Vec<OwnedGame>>;
    async fn recently_played_games(&self) -> Result<Vec<OwnedGame>>;
    async fn player_summary(&self) -> Result<serde_json::Value>;
}
