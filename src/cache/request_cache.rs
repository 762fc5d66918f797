//! Request cache with per-call TTL.
//!
//! Sits in front of a fetch function: a fresh entry is returned as-is, anything else
//! runs the fetcher and stores its result. Entries are never evicted in the
//! background; staleness is checked lazily on read.

use crate::clock::{duration_millis, Clock, SystemClock};
use crate::metrics::CacheMetrics;
use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// A cached response body and the instant (epoch millis) it goes stale.
#[derive(Clone)]
struct CacheEntry {
    data: Arc<dyn Any + Send + Sync>,
    expiry: i64,
}

impl CacheEntry {
    fn is_fresh(&self, now: i64) -> bool {
        self.expiry > now
    }
}

/// A thread-safe memoization layer for read-only requests.
///
/// Values of different types can live side by side; each entry is handed back as an
/// `Arc<T>` so every caller shares the same immutable value. Cloning the cache is
/// cheap and the clone shares the same store.
///
/// Concurrent misses on the same key are not coalesced: each caller runs its own
/// fetcher and the last one to finish is what stays cached.
///
/// ```ignore
/// let cache = RequestCache::new();
/// let sectors: Arc<Vec<String>> = cache
///     .cached_fetch("/api/entities/sectors", Duration::from_secs(60), || async {
///         client.get_sectors().await
///     })
///     .await?;
/// ```
#[derive(Clone)]
pub struct RequestCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    clock: Arc<dyn Clock>,
    metrics: CacheMetrics,
}

impl Default for RequestCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestCache {
    /// Create an empty cache driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty cache driven by the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
            metrics: CacheMetrics::new(),
        }
    }

    /// Return the cached value for `key` if it is still fresh, otherwise run
    /// `fetcher`, cache its result for `ttl` and return it.
    ///
    /// The expiry is measured from when the fetch completes. A zero `ttl` makes every
    /// call a miss. If the fetcher fails, its error is returned unchanged and the
    /// cache is not touched, so a previous entry (fresh or stale) survives and the
    /// next call retries.
    pub async fn cached_fetch<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        fetcher: F,
    ) -> Result<Arc<T>, E>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(data) = self.get::<T>(key) {
            self.metrics.record_hit();
            tracing::trace!(key = %key, "Cache hit");
            return Ok(data);
        }

        self.metrics.record_miss();
        tracing::trace!(key = %key, "Cache miss");

        match fetcher().await {
            Ok(value) => {
                let data = Arc::new(value);
                let expiry = self.store(key, data.clone(), ttl);
                self.metrics.record_fill();
                tracing::debug!(key = %key, expiry = expiry, "Cache filled");
                Ok(data)
            }
            Err(e) => {
                self.metrics.record_fill_error();
                tracing::warn!(key = %key, "Fetch failed, cache entry left unchanged");
                Err(e)
            }
        }
    }

    /// Look up a fresh entry without fetching.
    ///
    /// Returns `None` if the key is absent, stale, or holds a different type.
    pub fn get<T>(&self, key: &str) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let now = self.clock.now_millis();
        let entries = self.read();
        let entry = entries.get(key).filter(|entry| entry.is_fresh(now))?;
        entry.data.clone().downcast::<T>().ok()
    }

    /// Store a value directly, replacing any existing entry for `key`.
    pub fn insert<T>(&self, key: impl Into<String>, value: T, ttl: Duration) -> Arc<T>
    where
        T: Send + Sync + 'static,
    {
        let key = key.into();
        let data = Arc::new(value);
        self.store(&key, data.clone(), ttl);
        data
    }

    /// Check whether a fresh entry of any type exists for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        let now = self.clock.now_millis();
        self.read()
            .get(key)
            .map(|entry| entry.is_fresh(now))
            .unwrap_or(false)
    }

    /// Remove a specific key from the cache.
    pub fn remove(&self, key: &str) -> bool {
        self.write().remove(key).is_some()
    }

    /// Clear all entries from the cache.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Drop every stale entry and return how many were removed.
    ///
    /// Never called automatically; reads already ignore stale entries.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_millis();
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(now));
        let removed = before - entries.len();

        if removed > 0 {
            tracing::debug!(removed = removed, "Purged expired cache entries");
        }
        removed
    }

    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hit/miss counters for this cache (shared by clones).
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    fn store(&self, key: &str, data: Arc<dyn Any + Send + Sync>, ttl: Duration) -> i64 {
        let expiry = self
            .clock
            .now_millis()
            .saturating_add(duration_millis(ttl));
        self.write()
            .insert(key.to_string(), CacheEntry { data, expiry });
        expiry
    }

    // Entries are replaced whole under the lock, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for RequestCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestCache")
            .field("entries", &self.len())
            .field("metrics", &self.metrics.summary())
            .finish()
    }
}
