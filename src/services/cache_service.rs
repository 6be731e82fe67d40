//! In-process TTL cache for public list responses.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value as JsonValue;
use tokio::sync::RwLock;

const DEFAULT_CAPACITY: usize = 1024;

/// Resources whose list responses are cached, with their lifetimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachedResource {
    Banners,
    Statistics,
    News,
    About,
    Leadership,
}

impl CachedResource {
    pub fn name(self) -> &'static str {
        match self {
            CachedResource::Banners => "banners",
            CachedResource::Statistics => "statistics",
            CachedResource::News => "news",
            CachedResource::About => "about",
            CachedResource::Leadership => "leadership",
        }
    }

    pub fn ttl(self) -> Duration {
        let minutes = match self {
            CachedResource::Banners => 120,
            CachedResource::Statistics => 60,
            CachedResource::News => 30,
            CachedResource::About => 24 * 60,
            CachedResource::Leadership => 60,
        };
        Duration::from_secs(minutes * 60)
    }

    fn prefix(self) -> String {
        format!("{}|", self.name())
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: JsonValue,
    stored_at: Instant,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() > self.expires_at
    }
}

#[derive(Debug, Clone)]
pub struct ResponseCache {
    enabled: bool,
    capacity: usize,
    store: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl ResponseCache {
    pub fn new(enabled: bool) -> Self {
        Self::with_capacity(enabled, DEFAULT_CAPACITY)
    }

    /// At most `capacity` live entries; the oldest one is evicted first.
    pub fn with_capacity(enabled: bool, capacity: usize) -> Self {
        Self {
            enabled,
            capacity: capacity.max(1),
            store: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Cache key for a request. `request_key` should hold everything that
    /// changes the body: origin for media URLs, path and query string.
    pub fn key(resource: CachedResource, request_key: &str) -> String {
        format!("{}{}", resource.prefix(), request_key)
    }

    pub async fn get(&self, key: &str) -> Option<JsonValue> {
        if !self.enabled {
            return None;
        }
        let store = self.store.read().await;
        match store.get(key) {
            Some(entry) if !entry.is_expired() => Some(entry.value.clone()),
            _ => None,
        }
    }

    pub async fn set(&self, resource: CachedResource, key: String, value: JsonValue) {
        if !self.enabled {
            return;
        }
        let mut store = self.store.write().await;
        store.retain(|_, entry| !entry.is_expired());
        while store.len() >= self.capacity && !store.contains_key(&key) {
            let oldest = store
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(oldest) => store.remove(&oldest),
                None => break,
            };
        }
        let now = Instant::now();
        store.insert(
            key,
            CacheEntry {
                value,
                stored_at: now,
                expires_at: now + resource.ttl(),
            },
        );
    }

    pub async fn invalidate(&self, resource: CachedResource) {
        if !self.enabled {
            return;
        }
        let prefix = resource.prefix();
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|key, _| !key.starts_with(&prefix));
        tracing::debug!(
            resource = resource.name(),
            evicted = before - store.len(),
            "response cache invalidated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn stores_and_returns_values() {
        let cache = ResponseCache::new(true);
        let key = ResponseCache::key(CachedResource::News, "/api/news?page=2");
        assert!(cache.get(&key).await.is_none());
        cache.set(CachedResource::News, key.clone(), json!({"count": 1})).await;
        assert_eq!(cache.get(&key).await, Some(json!({"count": 1})));
    }

    #[tokio::test]
    async fn invalidation_is_scoped_to_resource() {
        let cache = ResponseCache::new(true);
        let news = ResponseCache::key(CachedResource::News, "/api/news");
        let banners = ResponseCache::key(CachedResource::Banners, "/api/banners");
        cache.set(CachedResource::News, news.clone(), json!([])).await;
        cache.set(CachedResource::Banners, banners.clone(), json!([])).await;

        cache.invalidate(CachedResource::News).await;
        assert!(cache.get(&news).await.is_none());
        assert!(cache.get(&banners).await.is_some());
    }

    #[tokio::test]
    async fn disabled_cache_never_hits() {
        let cache = ResponseCache::new(false);
        let key = ResponseCache::key(CachedResource::About, "/api/about");
        cache.set(CachedResource::About, key.clone(), json!({})).await;
        assert!(cache.get(&key).await.is_none());
    }

    #[tokio::test]
    async fn full_cache_evicts_oldest_entry() {
        let cache = ResponseCache::with_capacity(true, 2);
        let keys: Vec<String> = (1..=3)
            .map(|page| ResponseCache::key(CachedResource::News, &format!("/api/news?page={}", page)))
            .collect();
        for key in &keys {
            cache.set(CachedResource::News, key.clone(), json!({})).await;
            tokio::time::sleep(Duration::from_millis(2)).await;
        }

        assert!(cache.get(&keys[0]).await.is_none());
        assert!(cache.get(&keys[1]).await.is_some());
        assert!(cache.get(&keys[2]).await.is_some());
        assert_eq!(cache.store.read().await.len(), 2);
    }

    #[test]
    fn lifetimes_match_resources() {
        assert_eq!(CachedResource::Banners.ttl(), Duration::from_secs(2 * 3600));
        assert_eq!(CachedResource::News.ttl(), Duration::from_secs(30 * 60));
        assert_eq!(CachedResource::About.ttl(), Duration::from_secs(24 * 3600));
    }
}
