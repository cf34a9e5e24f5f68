//! Routing configuration types

use prism_domain::constants::DEFAULT_ROUTE_TIMEOUT_MS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Deadline applied when a caller does not pass one (milliseconds)
    pub default_timeout_ms: u64,
}

impl RoutingConfig {
    /// Default per-attempt deadline
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: DEFAULT_ROUTE_TIMEOUT_MS,
        }
    }
}
