//! Cache configuration types

use prism_domain::constants::{
    CACHE_DEFAULT_MAX_ENTRIES, CACHE_DEFAULT_NAMESPACE, CACHE_DEFAULT_TTL_MS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Response cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache enabled
    pub enabled: bool,

    /// Lifetime of a cached response (milliseconds)
    pub ttl_ms: u64,

    /// Maximum number of cached responses
    pub max_entries: u64,

    /// Namespace for cache keys
    pub namespace: String,
}

impl CacheConfig {
    /// TTL as a Duration
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_ms: CACHE_DEFAULT_TTL_MS,
            max_entries: CACHE_DEFAULT_MAX_ENTRIES,
            namespace: CACHE_DEFAULT_NAMESPACE.to_string(),
        }
    }
}
