//! Capability Routing Port
//!
//! Contract of the router seen by the domain layers that send requests, plus
//! the read-only snapshots it exposes for monitoring.

use crate::constants::DEFAULT_ROUTE_TIMEOUT_MS;
use crate::error::RouteResult;
use crate::ports::providers::ResponseStream;
use crate::value_objects::{AiRequest, AiResponse, Capability};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Circuit breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CircuitStatus {
    /// Normal operation, calls pass through
    #[default]
    Closed,
    /// Failing, calls are rejected without touching the vendor
    Open,
    /// Testing recovery with a single trial call
    HalfOpen,
}

impl CircuitStatus {
    /// Stable string form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::HalfOpen => "half_open",
        }
    }

    /// Numeric form used for gauges
    pub fn as_gauge(&self) -> f64 {
        match self {
            Self::Closed => 0.0,
            Self::Open => 1.0,
            Self::HalfOpen => 2.0,
        }
    }
}

impl fmt::Display for CircuitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one provider's circuit breaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitState {
    /// Provider the breaker guards
    pub provider_id: String,
    /// Current state
    pub state: CircuitStatus,
    /// Failures since the last success
    pub consecutive_failures: u32,
    /// When the last failure was recorded
    pub last_failure_at: Option<DateTime<Utc>>,
    /// When the state last changed
    pub last_state_change_at: DateTime<Utc>,
}

/// Result of periodic health probes for one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderHealth {
    /// Provider the record describes
    pub provider_id: String,
    /// When the last probe finished
    pub last_check_at: Option<DateTime<Utc>>,
    /// Outcome of the last probe; true until the first probe says otherwise
    pub healthy: bool,
    /// Smoothed probe latency
    pub average_latency_ms: Option<f64>,
    /// Failed probes since the last successful one
    pub consecutive_probe_failures: u32,
    /// Probes issued so far
    pub total_probes: u64,
}

impl ProviderHealth {
    /// Record for a provider that has not been probed yet
    pub fn unknown(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            last_check_at: None,
            healthy: true,
            average_latency_ms: None,
            consecutive_probe_failures: 0,
            total_probes: 0,
        }
    }

    /// Whether the average latency exceeds `threshold`
    pub fn is_slow(&self, threshold: Duration) -> bool {
        self.average_latency_ms
            .is_some_and(|avg| avg > threshold.as_secs_f64() * 1000.0)
    }
}

/// Per-call routing options
#[derive(Debug, Clone)]
pub struct RouteOptions {
    /// Hard deadline for each provider attempt
    pub timeout: Duration,
    /// Whether the cache may answer and store this request
    pub allow_cache: bool,
    /// Caller cancellation
    pub cancellation: Option<CancellationToken>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_ROUTE_TIMEOUT_MS),
            allow_cache: true,
            cancellation: None,
        }
    }
}

impl RouteOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-attempt deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable the cache for this call
    pub fn with_cache(mut self, allow_cache: bool) -> Self {
        self.allow_cache = allow_cache;
        self
    }

    /// Attach a caller cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Capability router interface
///
/// Sends a capability-typed request to the best available provider, falling
/// back through the capability's candidate chain on failure.
#[async_trait]
pub trait CapabilityRouter: Send + Sync {
    /// Route one request and wait for its response
    async fn route(
        &self,
        capability: Capability,
        request: AiRequest,
        options: RouteOptions,
    ) -> RouteResult<Arc<AiResponse>>;

    /// Route one request and stream its response
    async fn route_stream(
        &self,
        capability: Capability,
        request: AiRequest,
        options: RouteOptions,
    ) -> RouteResult<ResponseStream>;

    /// Snapshot of every provider's circuit breaker
    async fn circuit_states(&self) -> Vec<CircuitState>;

    /// Snapshot of every provider's probe health
    fn provider_health(&self) -> Vec<ProviderHealth>;
}
