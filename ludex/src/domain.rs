use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

/// Steam application id. Only equality and hashing are meaningful.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(pub u32);

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AppId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Opaque per-app payload as returned by the store details endpoint
pub type DetailRecord = serde_json::Value;

/// Per-request mapping of resolved apps to their details
pub type DetailMap = HashMap<AppId, DetailRecord>;

/// One entry of an owned or recently played games list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedGame {
    pub appid: AppId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playtime_forever: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playtime_2weeks: Option<u64>,
}

impl OwnedGame {
    pub fn new(appid: impl Into<AppId>) -> Self {
        Self {
            appid: appid.into(),
            name: None,
            playtime_forever: None,
            playtime_2weeks: None,
        }
    }
}

/// Snapshot of a detail cache. Not transactional.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats<K> {
    pub count: usize,
    pub ttl: Duration,
    pub keys: Vec<K>,
}

impl<K> CacheStats<K> {
    pub fn ttl_hours(&self) -> f64 {
        self.ttl.as_secs_f64() / 3600.0
    }
}

/// Result of splitting requested ids by cache state
#[derive(Debug, Default)]
pub struct CachePartition {
    pub hits: DetailMap,
    pub misses: Vec<AppId>,
}
