//! Response Cache Port
//!
//! Port for backends that keep routed responses for a bounded time. Values are
//! stored behind `Arc` so a hit hands out the same instance every caller
//! already shares.

use crate::error::Result;
use crate::value_objects::AiResponse;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Cache Operation Statistics
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of cache entries
    pub entries: u64,
    /// Cache hit rate (0.0 to 1.0)
    pub hit_rate: f64,
}

impl CacheStats {
    /// Create empty cache statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculate hit rate from hits and misses
    pub fn calculate_hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Response Cache Port
///
/// # Implementations
///
/// - **Moka**: in-memory, LRU-bounded, per-entry expiry
/// - **Null**: stores nothing, for tests and dry runs
///
/// Implementations must never return an entry whose TTL has elapsed, even if
/// the backing store has not physically evicted it yet.
#[async_trait]
pub trait ResponseCacheProvider: Send + Sync + std::fmt::Debug {
    /// Look up a live entry
    async fn get(&self, key: &str) -> Result<Option<Arc<AiResponse>>>;

    /// Store an entry that expires after `ttl`
    async fn put(&self, key: &str, value: Arc<AiResponse>, ttl: Duration) -> Result<()>;

    /// Remove an entry, returning whether it existed
    async fn invalidate(&self, key: &str) -> Result<bool>;

    /// Remove every entry
    async fn clear(&self) -> Result<()>;

    /// Get cache statistics
    async fn stats(&self) -> Result<CacheStats>;

    /// Get the cache size (number of entries)
    async fn size(&self) -> Result<usize>;

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}
