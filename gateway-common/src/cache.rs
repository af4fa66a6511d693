//! Time-bounded response cache.
//!
//! A [`CacheStore`] holds decoded JSON payloads with a per-entry expiry.
//! [`ResponseCache`] layers namespacing and memoization on top of any store,
//! so the store can be swapped for a test double or a shared backend.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

/// Default maximum number of entries held before expired ones are evicted.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Storage backend for cached payloads.
///
/// Implementations must treat an entry whose TTL has elapsed as absent.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a live value for `key`, if any.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key` for `ttl`, replacing any previous entry.
    async fn set(&self, key: &str, value: Value, ttl: Duration);

    /// Number of entries currently held, expired ones included.
    async fn len(&self) -> usize;

    /// Whether the store holds no entries.
    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Cached payload with its expiry.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Entries plus the earliest expiry among them, so eviction scans are only
/// run when at least one entry may have expired.
#[derive(Debug, Default)]
struct Entries {
    map: HashMap<String, CacheEntry>,
    earliest_expiry: Option<Instant>,
}

impl Entries {
    fn evict_expired(&mut self, now: Instant) {
        self.map.retain(|_, entry| entry.is_live(now));
        self.earliest_expiry = self.map.values().map(|entry| entry.expires_at).min();
    }

    fn may_have_expired(&self, now: Instant) -> bool {
        self.earliest_expiry.is_some_and(|earliest| earliest <= now)
    }
}

/// In-process cache store.
///
/// `capacity` is an eviction trigger, not a hard bound: once the store grows
/// past it, expired entries are dropped on the next write. Live entries are
/// never evicted, so a store full of live entries keeps growing until they
/// expire.
#[derive(Debug)]
pub struct MemoryCacheStore {
    entries: RwLock<Entries>,
    capacity: usize,
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl MemoryCacheStore {
    /// Create a store with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that evicts expired entries once it grows past `capacity`.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
            capacity,
        }
    }

    /// Drop every expired entry.
    pub async fn purge_expired(&self) {
        self.entries.write().await.evict_expired(Instant::now());
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries
            .map
            .get(key)
            .filter(|entry| entry.is_live(Instant::now()))
            .map(|entry| entry.value.clone())
    }

    async fn set(&self, key: &str, value: Value, ttl: Duration) {
        let now = Instant::now();
        let expires_at = now + ttl;

        let mut entries = self.entries.write().await;
        entries
            .map
            .insert(key.to_string(), CacheEntry { value, expires_at });
        entries.earliest_expiry = Some(
            entries
                .earliest_expiry
                .map_or(expires_at, |earliest| earliest.min(expires_at)),
        );

        if entries.map.len() > self.capacity && entries.may_have_expired(now) {
            entries.evict_expired(now);
        }
    }

    async fn len(&self) -> usize {
        self.entries.read().await.map.len()
    }
}

/// Memoizing front for a [`CacheStore`].
///
/// Keys are prefixed with the namespace (`"{namespace}-{key}"`) so several
/// caches can share one store without colliding.
#[derive(Clone)]
pub struct ResponseCache {
    store: Arc<dyn CacheStore>,
    namespace: String,
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

impl ResponseCache {
    /// Create a cache over `store` using `namespace` as key prefix.
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>, namespace: impl Into<String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
        }
    }

    /// Get the namespace.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Full store key for `key`.
    #[must_use]
    pub fn namespaced_key(&self, key: &str) -> String {
        format!("{}-{}", self.namespace, key)
    }

    /// Return the live value for `key`, or run `compute` and remember its
    /// result for `ttl`.
    ///
    /// Failed computations are not stored. Two concurrent misses for the
    /// same key may both run `compute`; the last write wins.
    ///
    /// # Errors
    ///
    /// Returns whatever error `compute` produced.
    pub async fn get_or_compute<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        compute: F,
    ) -> Result<Value, E>
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<Value, E>> + Send,
    {
        let key = self.namespaced_key(key);

        if let Some(value) = self.store.get(&key).await {
            debug!(key = %key, "Cache hit");
            return Ok(value);
        }

        debug!(key = %key, ttl_secs = ttl.as_secs_f64(), "Cache miss");
        let value = compute().await?;
        self.store.set(&key, value.clone(), ttl).await;

        Ok(value)
    }
}
