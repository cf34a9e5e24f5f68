//! Domain constants
//!
//! Default values for the routing tunables. Every one of these can be
//! overridden through configuration; they only apply when nothing else is set.

// ============================================================================
// ROUTING CONSTANTS
// ============================================================================

/// Default hard deadline for a single `route` call (milliseconds)
pub const DEFAULT_ROUTE_TIMEOUT_MS: u64 = 30_000;

// ============================================================================
// CIRCUIT BREAKER CONSTANTS
// ============================================================================

/// Consecutive failures before a provider's circuit opens
pub const CIRCUIT_BREAKER_FAILURE_THRESHOLD: u32 = 5;

/// Time an open circuit waits before allowing a trial call (milliseconds)
pub const CIRCUIT_BREAKER_RESET_TIMEOUT_MS: u64 = 60_000;

/// Capacity of the per-provider breaker actor mailbox
pub const CIRCUIT_BREAKER_MAILBOX_SIZE: usize = 100;

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default TTL for cached responses (milliseconds)
pub const CACHE_DEFAULT_TTL_MS: u64 = 300_000;

/// Default maximum number of cached responses
pub const CACHE_DEFAULT_MAX_ENTRIES: u64 = 200;

/// Default cache key namespace
pub const CACHE_DEFAULT_NAMESPACE: &str = "prism";

// ============================================================================
// BATCHING CONSTANTS
// ============================================================================

/// Window during which compatible requests are grouped (milliseconds)
pub const BATCH_DEFAULT_DELAY_MS: u64 = 1_000;

/// Maximum number of requests grouped into one vendor call
pub const BATCH_DEFAULT_SIZE: usize = 5;

// ============================================================================
// HEALTH MONITOR CONSTANTS
// ============================================================================

/// Interval between health probe rounds (seconds)
pub const HEALTH_DEFAULT_INTERVAL_SECS: u64 = 60;

/// Deadline for a single health probe (milliseconds)
pub const HEALTH_DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;

/// Average latency above which a provider is deprioritized (milliseconds)
pub const HEALTH_DEFAULT_LATENCY_THRESHOLD_MS: u64 = 10_000;

/// Weight of the newest sample in the running latency average
pub const HEALTH_LATENCY_SMOOTHING: f64 = 0.3;
