//! Cache key derivation

use crate::constants::CACHE_NAMESPACE_SEPARATOR;
use prism_domain::error::{Error, Result};
use prism_domain::value_objects::{AiRequest, Capability};

/// Cache key utilities
///
/// A request key depends only on the capability and the normalized request,
/// never on which provider ends up serving it, so any provider's answer can
/// satisfy a later identical request.
pub struct CacheKey;

impl CacheKey {
    /// Key identifying `request` routed for `capability`
    pub fn for_request(capability: Capability, request: &AiRequest) -> String {
        format!(
            "{}{}{}",
            capability.as_str(),
            CACHE_NAMESPACE_SEPARATOR,
            request.fingerprint()
        )
    }

    /// Create a namespaced cache key
    pub fn namespaced(namespace: &str, key: &str) -> String {
        if namespace.is_empty() {
            key.to_string()
        } else {
            format!("{namespace}{CACHE_NAMESPACE_SEPARATOR}{key}")
        }
    }

    /// Extract namespace from a namespaced key
    pub fn extract_namespace(key: &str) -> Option<&str> {
        key.split_once(CACHE_NAMESPACE_SEPARATOR).map(|(ns, _)| ns)
    }

    /// Validate cache key format
    pub fn validate_key(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::cache("Cache key cannot be empty"));
        }
        if key.chars().any(char::is_whitespace) {
            return Err(Error::cache("Cache key cannot contain whitespace"));
        }
        Ok(())
    }
}
