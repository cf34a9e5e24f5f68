//! Moka in-memory response cache
//!
//! ## Features
//!
//! - Concurrent cache with LRU eviction above `max_entries`
//! - Per-entry TTL, enforced both by Moka's expiry policy and on every read
//! - Hit/miss accounting
//!
//! ## Example
//!
//! ```ignore
//! use prism_providers::cache::MokaResponseCache;
//!
//! let cache = MokaResponseCache::with_capacity(500);
//! cache.put("text:abc", response, Duration::from_secs(300)).await?;
//! ```

use crate::constants::CACHE_DEFAULT_SIZE_LIMIT;
use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use moka::policy::EvictionPolicy;
use prism_domain::error::Result;
use prism_domain::ports::providers::cache::{CacheStats, ResponseCacheProvider};
use prism_domain::value_objects::AiResponse;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CachedResponse {
    value: Arc<AiResponse>,
    stored_at: Instant,
    ttl: Duration,
}

impl CachedResponse {
    fn is_expired(&self) -> bool {
        self.stored_at.elapsed() >= self.ttl
    }
}

/// Expires every entry after its own TTL, counted from the last write
struct EntryTtl;

impl Expiry<String, CachedResponse> for EntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedResponse,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedResponse,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-based response cache
#[derive(Clone)]
pub struct MokaResponseCache {
    cache: Cache<String, CachedResponse>,
    max_entries: u64,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl Default for MokaResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaResponseCache {
    /// Create a new cache with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(CACHE_DEFAULT_SIZE_LIMIT)
    }

    /// Create a new cache holding at most `max_entries` responses
    pub fn with_capacity(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .eviction_policy(EvictionPolicy::lru())
            .expire_after(EntryTtl)
            .build();

        Self {
            cache,
            max_entries,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get the maximum number of entries
    pub fn max_entries(&self) -> u64 {
        self.max_entries
    }

    fn record_miss(&self) -> Option<Arc<AiResponse>> {
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }
}

#[async_trait]
impl ResponseCacheProvider for MokaResponseCache {
    async fn get(&self, key: &str) -> Result<Option<Arc<AiResponse>>> {
        let Some(entry) = self.cache.get(key).await else {
            return Ok(self.record_miss());
        };

        // Left for `EntryTtl` to evict
        if entry.is_expired() {
            return Ok(self.record_miss());
        }

        self.hits.fetch_add(1, Ordering::Relaxed);
        Ok(Some(entry.value))
    }

    async fn put(&self, key: &str, value: Arc<AiResponse>, ttl: Duration) -> Result<()> {
        if ttl.is_zero() {
            return Ok(());
        }

        let entry = CachedResponse {
            value,
            stored_at: Instant::now(),
            ttl,
        };
        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        // Run pending tasks to ensure entry_count is accurate
        self.cache.run_pending_tasks().await;

        let mut stats = CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
            hit_rate: 0.0,
        };
        stats.hit_rate = stats.calculate_hit_rate();
        Ok(stats)
    }

    async fn size(&self) -> Result<usize> {
        self.cache.run_pending_tasks().await;
        Ok(usize::try_from(self.cache.entry_count()).unwrap_or(usize::MAX))
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaResponseCache")
            .field("max_entries", &self.max_entries)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
