//! Provider Constants
//!
//! Constants specific to provider implementations. These are separated from
//! domain constants (which live in prism-domain) and infrastructure constants.

// ============================================================================
// CACHE PROVIDER CONSTANTS
// ============================================================================

/// Default number of entries kept by the Moka response cache
pub const CACHE_DEFAULT_SIZE_LIMIT: u64 = 200;

// ============================================================================
// NULL ADAPTER CONSTANTS
// ============================================================================

/// Model name reported by the null adapter
pub const NULL_ADAPTER_MODEL: &str = "null-echo";

/// MIME type of images produced by the null adapter
pub const NULL_ADAPTER_IMAGE_MIME: &str = "image/png";

// ============================================================================
// HTTP RESPONSE CONSTANTS
// ============================================================================

/// Longest vendor error body kept in an error message (characters)
pub const HTTP_ERROR_BODY_MAX_CHARS: usize = 200;
