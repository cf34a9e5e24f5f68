//! Resilience configuration types

use prism_domain::constants::{CIRCUIT_BREAKER_FAILURE_THRESHOLD, CIRCUIT_BREAKER_RESET_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Resilience configuration
///
/// Applies to every provider's circuit breaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResilienceConfig {
    /// Consecutive failures that open a circuit
    pub failure_threshold: u32,

    /// Time an open circuit waits before allowing a trial call (milliseconds)
    pub reset_timeout_ms: u64,
}

impl ResilienceConfig {
    /// Reset timeout as a Duration
    pub fn reset_timeout(&self) -> Duration {
        Duration::from_millis(self.reset_timeout_ms)
    }
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            failure_threshold: CIRCUIT_BREAKER_FAILURE_THRESHOLD,
            reset_timeout_ms: CIRCUIT_BREAKER_RESET_TIMEOUT_MS,
        }
    }
}
