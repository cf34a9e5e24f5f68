//! Batching configuration types

use prism_domain::constants::{BATCH_DEFAULT_DELAY_MS, BATCH_DEFAULT_SIZE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request batching configuration
///
/// Batching only applies to adapters that declare batch support for the
/// capability being routed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchingConfig {
    /// Batching enabled
    pub enabled: bool,

    /// Window during which compatible requests are grouped (milliseconds)
    pub batch_delay_ms: u64,

    /// Maximum number of requests in one batch
    pub batch_size: usize,
}

impl BatchingConfig {
    /// Grouping window as a Duration
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

impl Default for BatchingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            batch_delay_ms: BATCH_DEFAULT_DELAY_MS,
            batch_size: BATCH_DEFAULT_SIZE,
        }
    }
}
