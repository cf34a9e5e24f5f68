//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Routing tunable defaults are defined in `prism_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "prism.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "prism";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "PRISM";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV_VAR: &str = "PRISM_LOG";

/// File stem used when the log file path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "prism";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Cache namespace separator
pub const CACHE_NAMESPACE_SEPARATOR: &str = ":";

// ============================================================================
// METRIC NAMES
// ============================================================================

/// Routed requests by capability and outcome
pub const METRIC_ROUTE_REQUESTS: &str = "prism_route_requests_total";

/// Route latency by capability
pub const METRIC_ROUTE_DURATION: &str = "prism_route_duration_seconds";

/// Adapter attempts by provider, capability and status
pub const METRIC_PROVIDER_ATTEMPTS: &str = "prism_provider_attempts_total";

/// Adapter attempt latency by provider
pub const METRIC_PROVIDER_LATENCY: &str = "prism_provider_attempt_duration_seconds";

/// Candidates skipped because their circuit rejected the call
pub const METRIC_CIRCUIT_REJECTIONS: &str = "prism_circuit_rejections_total";

/// Current circuit state per provider (0 closed, 1 open, 2 half-open)
pub const METRIC_CIRCUIT_STATE: &str = "prism_circuit_state";

/// Cache lookups by result
pub const METRIC_CACHE_LOOKUPS: &str = "prism_cache_lookups_total";

/// Callers that joined an in-flight request
pub const METRIC_COALESCED: &str = "prism_coalesced_requests_total";

/// Requests currently in flight
pub const METRIC_PENDING: &str = "prism_pending_requests";

/// Health probes by provider and result
pub const METRIC_HEALTH_PROBES: &str = "prism_health_probes_total";

/// Requests grouped into batches, by provider
pub const METRIC_BATCH_SIZE: &str = "prism_batch_size";
