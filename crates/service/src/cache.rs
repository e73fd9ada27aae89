//! Read-through entity cache owned by a repository service.
//!
//! Entries are filled on a read miss and never touched by writes. With the
//! default config nothing is ever evicted; a `max_capacity` switches moka's
//! size-bounded eviction on.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use configs::CacheConfig;
use moka::future::Cache;
use tracing::debug;

/// Hit/miss counters since construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

pub struct EntityCache<V> {
    entries: Cache<String, V>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V> EntityCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(cfg: &CacheConfig) -> Self {
        let mut builder = Cache::<String, V>::builder();
        if let Some(capacity) = cfg.max_capacity {
            builder = builder.max_capacity(capacity);
        }
        if let Some(ttl) = cfg.time_to_live_secs {
            builder = builder.time_to_live(Duration::from_secs(ttl));
        }
        Self { entries: builder.build(), hits: AtomicU64::new(0), misses: AtomicU64::new(0) }
    }

    /// Cache that keeps every entry for its whole lifetime.
    pub fn unbounded() -> Self {
        Self::new(&CacheConfig::unbounded())
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        let found = self.entries.get(key).await;
        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key, "cache hit");
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(key, "cache miss");
        }
        found
    }

    pub async fn insert(&self, key: String, value: V) {
        self.entries.insert(key, value).await;
    }

    /// Approximate number of live entries after pending maintenance runs.
    pub async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats { hits: self.hits.load(Ordering::Relaxed), misses: self.misses.load(Ordering::Relaxed) }
    }
}

impl<V> Default for EntityCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self { Self::unbounded() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_hits_and_misses() {
        let cache: EntityCache<String> = EntityCache::unbounded();
        assert_eq!(cache.get("a").await, None);
        cache.insert("a".into(), "alpha".into()).await;
        assert_eq!(cache.get("a").await.as_deref(), Some("alpha"));
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
        assert_eq!(cache.entry_count().await, 1);
    }

    #[tokio::test]
    async fn bounded_cache_stays_within_capacity() {
        let cache: EntityCache<u32> = EntityCache::new(&CacheConfig { max_capacity: Some(2), time_to_live_secs: None });
        for i in 0..10u32 {
            cache.insert(format!("k{i}"), i).await;
        }
        assert!(cache.entry_count().await <= 2);
    }
}
