//! Response caching with TTL and namespaces
//!
//! Cache backends live in prism-providers; this module derives keys and
//! wraps a backend with the router's namespace and TTL policy.

pub mod key;
pub mod provider;

pub use key::CacheKey;
pub use provider::SharedResponseCache;
