//! Error handling types
//!
//! Two families live here:
//!
//! - [`Error`] covers configuration, cache and infrastructure failures of the
//!   router itself.
//! - [`RouterError`] / [`AdapterError`] form the routing taxonomy surfaced to
//!   callers of `route`. Adapter errors only ever reach a caller wrapped inside
//!   [`RouterError::AllProvidersFailed`].

use crate::value_objects::Capability;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for routed operations
pub type RouteResult<T> = std::result::Result<T, RouterError>;

/// Main error type for Prism infrastructure
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Cache operation error
    #[error("Cache error: {message}")]
    Cache {
        /// Description of the cache error
        message: String,
    },

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Cache error creation methods
impl Error {
    /// Create a cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }
}

// ============================================================================
// ADAPTER ERRORS
// ============================================================================

/// Failure reported by a single provider adapter
///
/// Adapters translate vendor-specific failures (HTTP status codes, SDK error
/// enums) into one of these kinds. The router records every one of them on the
/// provider's circuit breaker and moves on to the next candidate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// Credentials were rejected by the vendor
    #[error("authentication failed: {message}")]
    Authentication {
        /// Vendor-provided detail
        message: String,
    },

    /// Rate limit or billing quota exhausted
    #[error("quota exceeded: {message}")]
    QuotaExceeded {
        /// Vendor-provided detail
        message: String,
    },

    /// The vendor answered but the payload could not be understood
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// What failed to parse
        message: String,
    },

    /// Transport-level failure (DNS, TLS, connection reset, 5xx)
    #[error("network error: {message}")]
    Network {
        /// Transport detail
        message: String,
    },

    /// The attempt did not finish before its deadline
    #[error("call timed out after {elapsed_ms} ms")]
    Timeout {
        /// How long the attempt ran before it was abandoned
        elapsed_ms: u64,
    },

    /// The adapter does not implement the requested operation
    #[error("unsupported operation: {message}")]
    Unsupported {
        /// What was asked for
        message: String,
    },

    /// Any other vendor failure
    #[error("vendor error: {message}")]
    Vendor {
        /// Vendor-provided detail
        message: String,
    },

    /// The attempt was abandoned because nobody is waiting for it anymore
    #[error("call cancelled")]
    Cancelled,
}

impl AdapterError {
    /// Create an authentication error
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a quota error
    pub fn quota_exceeded<S: Into<String>>(message: S) -> Self {
        Self::QuotaExceeded {
            message: message.into(),
        }
    }

    /// Create a malformed response error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a timeout error from the elapsed attempt time
    pub fn timeout(elapsed: Duration) -> Self {
        Self::Timeout {
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported<S: Into<String>>(message: S) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }

    /// Create a generic vendor error
    pub fn vendor<S: Into<String>>(message: S) -> Self {
        Self::Vendor {
            message: message.into(),
        }
    }

    /// Short machine-friendly label, used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication { .. } => "authentication",
            Self::QuotaExceeded { .. } => "quota_exceeded",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::Network { .. } => "network",
            Self::Timeout { .. } => "timeout",
            Self::Unsupported { .. } => "unsupported",
            Self::Vendor { .. } => "vendor",
            Self::Cancelled => "cancelled",
        }
    }
}

/// One failed attempt inside a fallback chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    /// Provider that was attempted
    pub provider_id: String,
    /// Why the attempt failed
    pub error: AdapterError,
}

impl AttemptFailure {
    /// Create a new attempt failure record
    pub fn new(provider_id: impl Into<String>, error: AdapterError) -> Self {
        Self {
            provider_id: provider_id.into(),
            error,
        }
    }
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider_id, self.error)
    }
}

// ============================================================================
// ROUTER ERRORS
// ============================================================================

/// Failure of a routed request as seen by the caller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// No enabled provider declares the capability (configuration problem)
    #[error("no enabled provider declares capability '{capability}'")]
    NoCapableProvider {
        /// Requested capability
        capability: Capability,
    },

    /// Every candidate was skipped because its circuit is open
    #[error("circuit open for every '{capability}' provider")]
    CircuitOpenForAll {
        /// Requested capability
        capability: Capability,
    },

    /// Every attempted candidate failed
    #[error("all '{capability}' providers failed ({} attempts): {}", .causes.len(), join_causes(.causes))]
    AllProvidersFailed {
        /// Requested capability
        capability: Capability,
        /// Underlying causes, in attempt order
        causes: Vec<AttemptFailure>,
    },

    /// The last attempted provider ran out of time
    #[error("route timed out after {} ms", .timeout.as_millis())]
    Timeout {
        /// Configured deadline of the route
        timeout: Duration,
    },

    /// The caller cancelled the route
    #[error("route cancelled by caller")]
    Cancelled,

    /// The request was rejected before any provider was consulted
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// What is wrong with the request
        message: String,
    },
}

impl RouterError {
    /// Create an invalid request error
    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Whether retrying the same request later may succeed
    ///
    /// Configuration and validation problems are not retryable; transient
    /// provider trouble is.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::CircuitOpenForAll { .. } | Self::AllProvidersFailed { .. } | Self::Timeout { .. }
        )
    }

    /// Short machine-friendly label, used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoCapableProvider { .. } => "no_capable_provider",
            Self::CircuitOpenForAll { .. } => "circuit_open_for_all",
            Self::AllProvidersFailed { .. } => "all_providers_failed",
            Self::Timeout { .. } => "timeout",
            Self::Cancelled => "cancelled",
            Self::InvalidRequest { .. } => "invalid_request",
        }
    }

    /// Attempt causes carried by [`RouterError::AllProvidersFailed`]
    pub fn causes(&self) -> &[AttemptFailure] {
        match self {
            Self::AllProvidersFailed { causes, .. } => causes,
            _ => &[],
        }
    }
}

fn join_causes(causes: &[AttemptFailure]) -> String {
    causes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
