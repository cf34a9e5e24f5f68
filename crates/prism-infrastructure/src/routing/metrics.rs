//! Routing metrics
//!
//! Thin facade over the `metrics` macros. Nothing is exported unless the
//! embedding binary installs a recorder, so recording is always safe to call.

use crate::constants::{
    METRIC_BATCH_SIZE, METRIC_CACHE_LOOKUPS, METRIC_CIRCUIT_REJECTIONS, METRIC_CIRCUIT_STATE,
    METRIC_COALESCED, METRIC_HEALTH_PROBES, METRIC_PENDING, METRIC_PROVIDER_ATTEMPTS,
    METRIC_PROVIDER_LATENCY, METRIC_ROUTE_DURATION, METRIC_ROUTE_REQUESTS,
};
use metrics::{counter, gauge, histogram};
use prism_domain::ports::infrastructure::routing::CircuitStatus;
use prism_domain::value_objects::Capability;
use tracing::trace;

/// Metrics recorder for the routing layer
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutingMetrics;

impl RoutingMetrics {
    /// Create a new metrics recorder
    pub fn new() -> Self {
        Self
    }

    /// Record a finished route and its outcome label
    pub fn record_route(&self, capability: Capability, outcome: &str, duration_seconds: f64) {
        counter!(METRIC_ROUTE_REQUESTS, "capability" => capability.as_str(), "outcome" => outcome.to_string()).increment(1);
        histogram!(METRIC_ROUTE_DURATION, "capability" => capability.as_str()).record(duration_seconds);
        trace!(%capability, outcome, duration_seconds, "Recorded route");
    }

    /// Record one adapter attempt
    pub fn record_attempt(
        &self,
        provider_id: &str,
        capability: Capability,
        status: &str,
        duration_seconds: f64,
    ) {
        counter!(METRIC_PROVIDER_ATTEMPTS, "provider" => provider_id.to_string(), "capability" => capability.as_str(), "status" => status.to_string()).increment(1);
        histogram!(METRIC_PROVIDER_LATENCY, "provider" => provider_id.to_string()).record(duration_seconds);
    }

    /// Record a candidate skipped by its breaker
    pub fn record_circuit_rejection(&self, provider_id: &str) {
        counter!(METRIC_CIRCUIT_REJECTIONS, "provider" => provider_id.to_string()).increment(1);
    }

    /// Publish the current breaker state
    pub fn record_circuit_state(&self, provider_id: &str, status: CircuitStatus) {
        gauge!(METRIC_CIRCUIT_STATE, "provider" => provider_id.to_string()).set(status.as_gauge());
    }

    /// Record a cache lookup
    pub fn record_cache_lookup(&self, hit: bool) {
        let result = if hit { "hit" } else { "miss" };
        counter!(METRIC_CACHE_LOOKUPS, "result" => result).increment(1);
    }

    /// Record a caller that joined an in-flight request
    pub fn record_coalesced(&self, capability: Capability) {
        counter!(METRIC_COALESCED, "capability" => capability.as_str()).increment(1);
    }

    /// Publish the number of in-flight requests
    #[allow(clippy::cast_precision_loss)]
    pub fn set_pending(&self, count: usize) {
        gauge!(METRIC_PENDING).set(count as f64);
    }

    /// Record a health probe result
    pub fn record_health_probe(&self, provider_id: &str, healthy: bool) {
        let result = if healthy { "healthy" } else { "unhealthy" };
        counter!(METRIC_HEALTH_PROBES, "provider" => provider_id.to_string(), "result" => result).increment(1);
    }

    /// Record the size of a submitted batch
    #[allow(clippy::cast_precision_loss)]
    pub fn record_batch(&self, provider_id: &str, size: usize) {
        histogram!(METRIC_BATCH_SIZE, "provider" => provider_id.to_string()).record(size as f64);
    }
}
