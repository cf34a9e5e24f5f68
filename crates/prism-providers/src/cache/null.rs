//! Null response cache for testing
//!
//! A cache implementation that doesn't store anything. Every lookup is a
//! miss, so every route reaches a provider.

use async_trait::async_trait;
use prism_domain::error::Result;
use prism_domain::ports::providers::cache::{CacheStats, ResponseCacheProvider};
use prism_domain::value_objects::AiResponse;
use std::sync::Arc;
use std::time::Duration;

/// Null cache provider that doesn't store anything
///
/// # Example
///
/// ```rust
/// use prism_providers::cache::NullCacheProvider;
///
/// let provider = NullCacheProvider::new();
/// // All operations succeed but nothing is cached
/// ```
#[derive(Debug, Clone, Default)]
pub struct NullCacheProvider;

impl NullCacheProvider {
    /// Create a new null cache provider
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResponseCacheProvider for NullCacheProvider {
    async fn get(&self, _key: &str) -> Result<Option<Arc<AiResponse>>> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _value: Arc<AiResponse>, _ttl: Duration) -> Result<()> {
        Ok(())
    }

    async fn invalidate(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        Ok(CacheStats::new())
    }

    async fn size(&self) -> Result<usize> {
        Ok(0)
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
