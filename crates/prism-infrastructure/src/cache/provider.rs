//! Shared response cache wrapper
//!
//! Wraps any `ResponseCacheProvider` from prism-providers with the router's
//! namespace and TTL policy.

use crate::cache::CacheKey;
use crate::config::CacheConfig;
use prism_domain::error::Result;
use prism_domain::ports::providers::{CacheStats, ResponseCacheProvider};
use prism_domain::value_objects::AiResponse;
use prism_providers::cache::{MokaResponseCache, NullCacheProvider};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Shared response cache
///
/// Cheap to clone; every clone talks to the same backend.
#[derive(Clone)]
pub struct SharedResponseCache {
    provider: Arc<dyn ResponseCacheProvider>,
    namespace: String,
    ttl: Duration,
}

impl SharedResponseCache {
    /// Wrap a backend
    pub fn new(
        provider: Arc<dyn ResponseCacheProvider>,
        namespace: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self {
            provider,
            namespace: namespace.into(),
            ttl,
        }
    }

    /// Build the backend described by `config`
    ///
    /// A disabled cache is backed by [`NullCacheProvider`].
    pub fn from_config(config: &CacheConfig) -> Self {
        let provider: Arc<dyn ResponseCacheProvider> = if config.enabled {
            Arc::new(MokaResponseCache::with_capacity(config.max_entries))
        } else {
            Arc::new(NullCacheProvider::new())
        };
        Self::new(provider, config.namespace.clone(), config.ttl())
    }

    /// Cache that stores nothing
    pub fn null() -> Self {
        Self::new(Arc::new(NullCacheProvider::new()), "", Duration::ZERO)
    }

    /// TTL applied to stored responses
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Key namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Name of the backend
    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Get the underlying cache provider as an Arc
    pub fn as_provider(&self) -> Arc<dyn ResponseCacheProvider> {
        Arc::clone(&self.provider)
    }

    fn namespaced_key(&self, key: &str) -> String {
        CacheKey::namespaced(&self.namespace, key)
    }
}

// Cache Operations Methods
impl SharedResponseCache {
    /// Look up a live response
    pub async fn get(&self, key: &str) -> Result<Option<Arc<AiResponse>>> {
        self.provider.get(&self.namespaced_key(key)).await
    }

    /// Store a response with the configured TTL
    pub async fn put(&self, key: &str, value: Arc<AiResponse>) -> Result<()> {
        self.put_with_ttl(key, value, self.ttl).await
    }

    /// Store a response with an explicit TTL
    pub async fn put_with_ttl(
        &self,
        key: &str,
        value: Arc<AiResponse>,
        ttl: Duration,
    ) -> Result<()> {
        CacheKey::validate_key(key)?;
        self.provider
            .put(&self.namespaced_key(key), value, ttl)
            .await
    }

    /// Remove a response
    pub async fn invalidate(&self, key: &str) -> Result<bool> {
        self.provider.invalidate(&self.namespaced_key(key)).await
    }

    /// Clear all values from the cache
    pub async fn clear(&self) -> Result<()> {
        self.provider.clear().await
    }

    /// Get cache statistics
    pub async fn stats(&self) -> Result<CacheStats> {
        self.provider.stats().await
    }

    /// Get the cache size
    pub async fn size(&self) -> Result<usize> {
        self.provider.size().await
    }
}

impl fmt::Debug for SharedResponseCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedResponseCache")
            .field("provider", &self.provider.provider_name())
            .field("namespace", &self.namespace)
            .field("ttl", &self.ttl)
            .finish()
    }
}
