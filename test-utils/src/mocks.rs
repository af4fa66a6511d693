//! Test doubles.

use async_trait::async_trait;
use gateway_common::{CacheStore, MemoryCacheStore};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

/// Cache store that records every access.
#[derive(Debug, Default)]
pub struct CountingStore {
    inner: MemoryCacheStore,
    gets: AtomicUsize,
    hits: AtomicUsize,
    sets: RwLock<Vec<(String, Duration)>>,
}

impl CountingStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lookups.
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    /// Number of lookups that found a live entry.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Keys written, with their TTL, in write order.
    pub async fn sets(&self) -> Vec<(String, Duration)> {
        self.sets.read().await.clone()
    }
}

#[async_trait]
impl CacheStore for CountingStore {
    async fn get(&self, key: &str) -> Option<Value> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        let value = self.inner.get(key).await;
        if value.is_some() {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
        value
    }

    async fn set(&self, key: &str, value: Value, ttl: Duration) {
        self.sets.write().await.push((key.to_string(), ttl));
        self.inner.set(key, value, ttl).await;
    }

    async fn len(&self) -> usize {
        self.inner.len().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_counts_accesses() {
        let store = CountingStore::new();

        assert_eq!(store.get("gateway-lists").await, None);
        store
            .set("gateway-lists", json!([]), Duration::from_secs(5))
            .await;
        assert_eq!(store.get("gateway-lists").await, Some(json!([])));

        assert_eq!(store.gets(), 2);
        assert_eq!(store.hits(), 1);
        assert_eq!(
            store.sets().await,
            vec![("gateway-lists".to_string(), Duration::from_secs(5))]
        );
        assert_eq!(store.len().await, 1);
    }
}
