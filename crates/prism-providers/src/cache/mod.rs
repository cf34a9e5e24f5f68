//! Response Cache Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`NullCacheProvider`] | Testing | Stores nothing |
//! | [`MokaResponseCache`] | Local | In-memory, LRU-bounded, per-entry TTL |
//!
//! ## Provider Selection Guide
//!
//! - **Development/Testing**: Use `NullCacheProvider` to bypass caching
//! - **Single Instance**: Use `MokaResponseCache`

#[cfg(feature = "cache-moka")]
pub mod moka;
pub mod null;

// Re-export for convenience
#[cfg(feature = "cache-moka")]
pub use moka::MokaResponseCache;
pub use null::NullCacheProvider;

// Re-export domain types used by cache providers
pub use prism_domain::ports::providers::cache::CacheStats;
