//! In-memory doubles of the ports for unit tests.

use crate::domain::{AppId, CacheStats, DetailRecord, OwnedGame};
use crate::ports::{DetailCache, DetailSource, LibrarySource};
use async_trait::async_trait;
use serde_json::json;
use shared::{Error, Result};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Non-expiring cache backed by a mutex-guarded map
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<AppId, DetailRecord>>,
}

impl MemoryCache {
    pub fn with_entries(entries: impl IntoIterator<Item = (AppId, DetailRecord)>) -> Self {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn contains(&self, id: AppId) -> bool {
        self.entries.lock().unwrap().contains_key(&id)
    }
}

impl DetailCache<AppId, DetailRecord> for MemoryCache {
    fn get(&self, key: &AppId) -> Option<DetailRecord> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: AppId, val: DetailRecord) {
        self.entries.lock().unwrap().insert(key, val);
    }

    fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    fn stats(&self) -> CacheStats<AppId> {
        let entries = self.entries.lock().unwrap();
        CacheStats {
            count: entries.len(),
            ttl: Duration::from_secs(3600),
            keys: entries.keys().copied().collect(),
        }
    }
}

/// Detail source that succeeds only for the configured ids and records every call
#[derive(Default)]
pub struct ScriptedSource {
    available: Mutex<HashMap<AppId, DetailRecord>>,
    calls: Mutex<Vec<AppId>>,
}

impl ScriptedSource {
    pub fn succeeding_for(ids: &[u32]) -> Self {
        let source = Self::default();
        for &id in ids {
            source.make_available(AppId(id));
        }
        source
    }

    pub fn make_available(&self, id: AppId) {
        self.available
            .lock()
            .unwrap()
            .insert(id, detail_for(id));
    }

    pub fn make_unavailable(&self) {
        self.available.lock().unwrap().clear();
    }

    pub fn calls(&self) -> Vec<AppId> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl DetailSource for ScriptedSource {
    async fn fetch_detail(&self, id: AppId) -> Result<DetailRecord> {
        self.calls.lock().unwrap().push(id);
        tokio::task::yield_now().await;
        let found = self.available.lock().unwrap().get(&id).cloned();
        found.ok_or(Error::Unsuccessful(id.0))
    }
}

/// Detail source that always succeeds and tracks how many calls overlap
#[derive(Default)]
pub struct OverlapSource {
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    completed: AtomicUsize,
}

impl OverlapSource {
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DetailSource for OverlapSource {
    async fn fetch_detail(&self, id: AppId) -> Result<DetailRecord> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        // Stay in flight across a few scheduler turns so siblings can start.
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(detail_for(id))
    }
}

/// Library source returning fixed lists, or failing when `fail` is set
#[derive(Default)]
pub struct FixedLibrary {
    pub owned: Vec<OwnedGame>,
    pub recent: Vec<OwnedGame>,
    pub fail: bool,
}

impl FixedLibrary {
    pub fn owning(ids: &[u32]) -> Self {
        Self {
            owned: ids.iter().map(|&id| OwnedGame::new(id)).collect(),
            ..Default::default()
        }
    }

    fn check(&self, context: &str) -> Result<()> {
        if self.fail {
            Err(Error::UpstreamStatus {
                context: context.to_string(),
                status: 500,
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LibrarySource for FixedLibrary {
    async fn owned_games(&self) -> Result<Vec<OwnedGame>> {
        self.check("Failed to fetch owned games")?;
        Ok(self.owned.clone())
    }

    async fn recently_played_games(&self) -> Result<Vec<OwnedGame>> {
        self.check("Failed to fetch recently played games")?;
        Ok(self.recent.clone())
    }

    async fn player_summary(&self) -> Result<serde_json::Value> {
        self.check("Failed to fetch user data")?;
        Ok(json!({"response": {"players": [{"personaname": "tester"}]}}))
    }
}

pub fn detail_for(id: AppId) -> DetailRecord {
    json!({"success": true, "data": {"steam_appid": id.0, "name": format!("Game {id}")}})
}
