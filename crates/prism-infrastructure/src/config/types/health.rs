//! Health monitoring configuration types

use prism_domain::constants::{
    HEALTH_DEFAULT_INTERVAL_SECS, HEALTH_DEFAULT_LATENCY_THRESHOLD_MS,
    HEALTH_DEFAULT_PROBE_TIMEOUT_MS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Health monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Run periodic probes
    pub enabled: bool,

    /// Interval between probe rounds (seconds)
    pub interval_secs: u64,

    /// Deadline for a single probe (milliseconds)
    pub probe_timeout_ms: u64,

    /// Average latency above which a provider is tried later (milliseconds)
    pub latency_threshold_ms: u64,
}

impl HealthConfig {
    /// Probe interval as a Duration
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Probe deadline as a Duration
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Latency threshold as a Duration
    pub fn latency_threshold(&self) -> Duration {
        Duration::from_millis(self.latency_threshold_ms)
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: HEALTH_DEFAULT_INTERVAL_SECS,
            probe_timeout_ms: HEALTH_DEFAULT_PROBE_TIMEOUT_MS,
            latency_threshold_ms: HEALTH_DEFAULT_LATENCY_THRESHOLD_MS,
        }
    }
}
