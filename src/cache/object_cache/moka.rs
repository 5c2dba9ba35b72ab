use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::{Expiry, future::Cache};
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaObjectCache);

#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// 每个条目按写入时给定的 TTL 过期
struct EntryExpiry;

impl Expiry<String, Entry> for EntryExpiry {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _at: Instant,
        _current: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

pub struct MokaObjectCache {
    inner: Cache<String, Entry>,
    default_ttl: u64,
}

impl MokaObjectCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        Ok(Self::with_capacity(
            config.cache.memory.max_capacity,
            config.cache.default_ttl,
        ))
    }

    pub fn with_capacity(max_capacity: u64, default_ttl: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry)
            .build();

        debug!(
            "Moka cache ready (capacity: {}, default TTL: {}s)",
            max_capacity, default_ttl
        );
        Self { inner, default_ttl }
    }
}

#[async_trait]
impl ObjectCache for MokaObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some(entry) => CacheResult::Found(entry.value),
            None => CacheResult::NotFound,
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = if ttl == 0 { self.default_ttl } else { ttl };
        self.inner
            .insert(
                key,
                Entry {
                    value,
                    ttl: Duration::from_secs(ttl),
                },
            )
            .await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaObjectCache::with_capacity(16, 60));
        cache
            .insert_raw("user:1".to_string(), "alice".to_string(), 0)
            .await;
        assert_eq!(
            cache.get_raw("user:1").await,
            CacheResult::Found("alice".to_string())
        );

        cache.remove("user:1").await;
        assert_eq!(cache.get_raw("user:1").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaObjectCache::with_capacity(16, 60));
        cache
            .insert_json("scores".to_string(), &vec![25.0, 28.0, 35.0], 0)
            .await;
        let scores: Option<Vec<f64>> = cache.get_json("scores").await.found();
        assert_eq!(scores, Some(vec![25.0, 28.0, 35.0]));

        cache
            .insert_raw("broken".to_string(), "{not json".to_string(), 0)
            .await;
        assert_eq!(
            cache.get_json::<Vec<f64>>("broken").await,
            CacheResult::NotFound
        );
    }
}
