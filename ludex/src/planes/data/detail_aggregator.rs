use crate::domain::{AppId, CachePartition, DetailMap, DetailRecord};
use crate::planes::data::operation::DetailOperations;
use crate::ports::{DetailCache, DetailSource};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cache-aware batch lookup of app details
///
/// Misses are fetched concurrently; an app whose fetch fails is logged and
/// left out of the result instead of failing the batch.
#[derive(Clone)]
pub struct DetailAggregator {
    cache: Arc<dyn DetailCache<AppId, DetailRecord>>,
    source: Arc<dyn DetailSource>,
    max_in_flight: usize,
}

impl DetailAggregator {
    pub const DEFAULT_MAX_IN_FLIGHT: usize = 16;

    pub fn new(
        cache: Arc<dyn DetailCache<AppId, DetailRecord>>,
        source: Arc<dyn DetailSource>,
    ) -> Self {
        Self::with_max_in_flight(cache, source, Self::DEFAULT_MAX_IN_FLIGHT)
    }

    pub fn with_max_in_flight(
        cache: Arc<dyn DetailCache<AppId, DetailRecord>>,
        source: Arc<dyn DetailSource>,
        max_in_flight: usize,
    ) -> Self {
        Self {
            cache,
            source,
            max_in_flight: max_in_flight.max(1),
        }
    }

    /// Split `ids` into cache hits and misses. Duplicates are looked up once.
    pub fn partition(&self, ids: &[AppId]) -> CachePartition {
        let mut seen = HashSet::with_capacity(ids.len());
        let mut partition = CachePartition::default();

        for &id in ids {
            if !seen.insert(id) {
                continue;
            }
            match self.cache.get(&id) {
                Some(record) => {
                    partition.hits.insert(id, record);
                }
                None => partition.misses.push(id),
            }
        }

        partition
    }

    async fn fetch_one(&self, id: AppId) -> Option<(AppId, DetailRecord)> {
        match self.source.fetch_detail(id).await {
            Ok(record) => {
                self.cache.set(id, record.clone());
                Some((id, record))
            }
            Err(e) => {
                warn!("Failed to fetch details for app {}: {}", id, e);
                None
            }
        }
    }
}

#[async_trait]
impl DetailOperations for DetailAggregator {
    async fn fetch_details(&self, ids: &[AppId]) -> DetailMap {
        let CachePartition { mut hits, misses } = self.partition(ids);

        if misses.is_empty() {
            debug!("All {} requested apps served from cache", hits.len());
            return hits;
        }

        info!(
            "Fetching details for {} apps ({} cached)",
            misses.len(),
            hits.len()
        );

        let requested = misses.len();
        let fetched: Vec<(AppId, DetailRecord)> = stream::iter(misses)
            .map(|id| self.fetch_one(id))
            .buffer_unordered(self.max_in_flight)
            .filter_map(|outcome| async move { outcome })
            .collect()
            .await;

        if fetched.len() < requested {
            warn!(
                "{} of {} uncached apps could not be resolved",
                requested - fetched.len(),
                requested
            );
        }

        hits.extend(fetched);
        hits
    }
}

impl std::fmt::Debug for DetailAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailAggregator")
            .field("cache", &"<dyn DetailCache>")
            .field("max_in_flight", &self.max_in_flight)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryCache, OverlapSource, ScriptedSource, detail_for};

    fn ids(raw: &[u32]) -> Vec<AppId> {
        raw.iter().copied().map(AppId).collect()
    }

    fn aggregator(cache: Arc<MemoryCache>, source: Arc<ScriptedSource>) -> DetailAggregator {
        DetailAggregator::new(cache, source)
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_upstream_calls() {
        let cache = Arc::new(MemoryCache::default());
        let source = Arc::new(ScriptedSource::succeeding_for(&[1, 2]));

        let result = aggregator(cache, source.clone()).fetch_details(&[]).await;

        assert!(result.is_empty());
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_all_cached_skips_upstream() {
        let cache = Arc::new(MemoryCache::with_entries([
            (AppId(1), detail_for(AppId(1))),
            (AppId(2), detail_for(AppId(2))),
        ]));
        let source = Arc::new(ScriptedSource::default());

        let result = aggregator(cache, source.clone())
            .fetch_details(&ids(&[1, 2]))
            .await;

        assert_eq!(result.len(), 2);
        assert_eq!(result[&AppId(1)], detail_for(AppId(1)));
        assert_eq!(result[&AppId(2)], detail_for(AppId(2)));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_only_successes() {
        let cache = Arc::new(MemoryCache::default());
        let source = Arc::new(ScriptedSource::succeeding_for(&[10, 30]));

        let result = aggregator(cache.clone(), source.clone())
            .fetch_details(&ids(&[10, 20, 30]))
            .await;

        assert_eq!(result.len(), 2);
        assert!(result.contains_key(&AppId(10)));
        assert!(result.contains_key(&AppId(30)));
        assert!(!result.contains_key(&AppId(20)));
        assert!(cache.contains(AppId(10)));
        assert!(cache.contains(AppId(30)));
        assert!(!cache.contains(AppId(20)));
        assert_eq!(source.call_count(), 3);
    }

    #[tokio::test]
    async fn test_second_call_served_from_cache_and_failures_retried() {
        let cache = Arc::new(MemoryCache::default());
        let source = Arc::new(ScriptedSource::succeeding_for(&[10, 30]));
        let aggregator = aggregator(cache, source.clone());
        let requested = ids(&[10, 20, 30]);

        let first = aggregator.fetch_details(&requested).await;
        source.make_unavailable();
        let second = aggregator.fetch_details(&requested).await;

        assert_eq!(first, second);
        assert_eq!(second.len(), 2);
        // Only 20 is attempted again.
        assert_eq!(source.calls()[3..], [AppId(20)]);
        assert_eq!(source.call_count(), 4);
    }

    #[tokio::test]
    async fn test_successful_fetch_populates_cache() {
        let cache = Arc::new(MemoryCache::default());
        let source = Arc::new(ScriptedSource::succeeding_for(&[7]));
        let aggregator = aggregator(cache.clone(), source.clone());

        aggregator.fetch_details(&ids(&[7])).await;
        aggregator.fetch_details(&ids(&[7])).await;

        assert_eq!(cache.len(), 1);
        assert_eq!(source.calls(), vec![AppId(7)]);
    }

    #[tokio::test]
    async fn test_duplicates_are_fetched_once() {
        let cache = Arc::new(MemoryCache::default());
        let source = Arc::new(ScriptedSource::succeeding_for(&[5, 6]));

        let result = aggregator(cache, source.clone())
            .fetch_details(&ids(&[5, 5, 6, 5, 6]))
            .await;

        assert_eq!(result.len(), 2);
        let mut calls = source.calls();
        calls.sort();
        assert_eq!(calls, ids(&[5, 6]));
    }

    #[tokio::test]
    async fn test_mixed_hits_and_misses_are_merged() {
        let cache = Arc::new(MemoryCache::with_entries([(AppId(1), detail_for(AppId(1)))]));
        let source = Arc::new(ScriptedSource::succeeding_for(&[2]));

        let result = aggregator(cache, source.clone())
            .fetch_details(&ids(&[1, 2, 3]))
            .await;

        assert_eq!(result.len(), 2);
        let mut calls = source.calls();
        calls.sort();
        assert_eq!(calls, ids(&[2, 3]));
    }

    #[tokio::test]
    async fn test_all_misses_attempted_with_small_concurrency_limit() {
        let cache = Arc::new(MemoryCache::default());
        let all: Vec<u32> = (1..=25).collect();
        let source = Arc::new(ScriptedSource::succeeding_for(&all));
        let aggregator = DetailAggregator::with_max_in_flight(cache, source.clone(), 3);

        let result = aggregator.fetch_details(&ids(&all)).await;

        assert_eq!(result.len(), 25);
        assert_eq!(source.call_count(), 25);
    }

    #[tokio::test]
    async fn test_misses_are_fetched_concurrently_within_limit() {
        let cache = Arc::new(MemoryCache::default());
        let source = Arc::new(OverlapSource::default());
        let aggregator = DetailAggregator::with_max_in_flight(cache, source.clone(), 4);
        let all: Vec<u32> = (1..=12).collect();

        let result = aggregator.fetch_details(&ids(&all)).await;

        assert_eq!(result.len(), 12);
        assert_eq!(source.completed(), 12);
        assert!(source.peak() > 1, "fetches ran one at a time");
        assert!(source.peak() <= 4, "peak {} exceeded the limit", source.peak());
    }

    #[test]
    fn test_partition_splits_hits_and_misses() {
        let cache = Arc::new(MemoryCache::with_entries([(AppId(1), detail_for(AppId(1)))]));
        let aggregator = aggregator(cache, Arc::new(ScriptedSource::default()));

        let partition = aggregator.partition(&ids(&[1, 2, 2, 1, 3]));

        assert_eq!(partition.hits.len(), 1);
        assert_eq!(partition.misses, ids(&[2, 3]));
    }
}
