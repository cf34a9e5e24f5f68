//! External Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | ProviderAdapter | One vendor behind the capability-uniform call contract |
//! | ResponseCacheProvider | Backend storing routed responses with a TTL |

/// Vendor adapter port
pub mod adapter;
/// Response cache port
pub mod cache;

pub use adapter::{AdapterResult, ProviderAdapter, ResponseStream};
pub use cache::{CacheStats, ResponseCacheProvider};
