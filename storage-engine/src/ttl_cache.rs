use crate::clock::{Clock, SystemClock};
use dashmap::DashMap;
use ludex::domain::CacheStats;
use ludex::ports::DetailCache;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// DashMap-based cache with a fixed time-to-live
/// Expired entries are dropped lazily, on the lookup that finds them stale.
/// There is no capacity bound and no background sweeper.
pub struct TtlCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + Clone + 'static,
    V: Send + Sync + Clone + 'static,
{
    entries: DashMap<K, Entry<V>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<K, V> TtlCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + Clone + 'static,
    V: Send + Sync + Clone + 'static,
{
    pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_fresh(&self, inserted_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(inserted_at) <= self.ttl
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + Clone + 'static,
    V: Send + Sync + Clone + 'static,
{
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

impl<K, V> DetailCache<K, V> for TtlCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + Clone + 'static,
    V: Send + Sync + Clone + 'static,
{
    fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();

        // The read guard must be released before removing from the same shard.
        let stale_since = {
            let entry = self.entries.get(key)?;
            if self.is_fresh(entry.inserted_at, now) {
                return Some(entry.value.clone());
            }
            entry.inserted_at
        };

        // Only drop the entry we saw; a concurrent overwrite stays.
        let removed = self
            .entries
            .remove_if(key, |_, entry| entry.inserted_at == stale_since);
        if removed.is_some() {
            debug!("Evicted expired cache entry {:?}", key);
        }
        None
    }

    fn set(&self, key: K, val: V) {
        self.entries.insert(
            key,
            Entry {
                value: val,
                inserted_at: self.clock.now(),
            },
        );
    }

    fn clear(&self) {
        self.entries.clear();
    }

    fn stats(&self) -> CacheStats<K> {
        let now = self.clock.now();
        let keys: Vec<K> = self
            .entries
            .iter()
            .filter(|entry| self.is_fresh(entry.inserted_at, now))
            .map(|entry| entry.key().clone())
            .collect();

        CacheStats {
            count: keys.len(),
            ttl: self.ttl,
            keys,
        }
    }
}

impl<K, V> Debug for TtlCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + Clone + 'static,
    V: Send + Sync + Clone + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("entry_count", &self.entries.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}
