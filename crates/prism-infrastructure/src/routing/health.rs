//! Health Monitoring for Provider Routing
//!
//! Keeps one [`ProviderHealth`] record per provider, fed by periodic `ping`
//! probes. Health only influences candidate order; it never opens or closes
//! a circuit.

use crate::config::HealthConfig;
use crate::routing::metrics::RoutingMetrics;
use crate::utils::TimedOperation;
use chrono::Utc;
use dashmap::DashMap;
use futures::future::join_all;
use prism_domain::constants::HEALTH_LATENCY_SMOOTHING;
use prism_domain::ports::infrastructure::routing::ProviderHealth;
use prism_domain::ports::providers::ProviderAdapter;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Ordering tier derived from a health record
///
/// Candidates are stably sorted by tier, so providers inside one tier keep
/// their priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HealthTier {
    /// Last probe succeeded (or no probe yet) and latency is acceptable
    Healthy,
    /// Last probe succeeded but average latency is above the threshold
    Slow,
    /// Last probe failed
    Unhealthy,
}

/// Probe-driven provider health tracker
#[derive(Debug)]
pub struct HealthMonitor {
    records: DashMap<String, ProviderHealth>,
    config: HealthConfig,
    metrics: RoutingMetrics,
}

impl HealthMonitor {
    /// Create a monitor with an `unknown` record per provider
    pub fn new<I, S>(config: HealthConfig, provider_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records = DashMap::new();
        for id in provider_ids {
            let id = id.into();
            records.insert(id.clone(), ProviderHealth::unknown(id));
        }
        Self {
            records,
            config,
            metrics: RoutingMetrics::new(),
        }
    }

    /// Probe configuration
    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Current record for a provider
    pub fn health(&self, provider_id: &str) -> ProviderHealth {
        self.records
            .get(provider_id)
            .map(|record| record.clone())
            .unwrap_or_else(|| ProviderHealth::unknown(provider_id))
    }

    /// Ordering tier for a provider
    pub fn tier(&self, provider_id: &str) -> HealthTier {
        let Some(record) = self.records.get(provider_id) else {
            return HealthTier::Healthy;
        };
        if !record.healthy {
            HealthTier::Unhealthy
        } else if record.is_slow(self.config.latency_threshold()) {
            HealthTier::Slow
        } else {
            HealthTier::Healthy
        }
    }

    /// Apply one probe outcome; `Some(latency)` means the probe succeeded
    pub fn record_probe(&self, provider_id: &str, outcome: Option<Duration>) {
        let mut record = self
            .records
            .entry(provider_id.to_string())
            .or_insert_with(|| ProviderHealth::unknown(provider_id));

        record.total_probes += 1;
        record.last_check_at = Some(Utc::now());

        match outcome {
            Some(latency) => {
                let sample = latency.as_secs_f64() * 1000.0;
                record.average_latency_ms = Some(match record.average_latency_ms {
                    Some(avg) => {
                        HEALTH_LATENCY_SMOOTHING * sample + (1.0 - HEALTH_LATENCY_SMOOTHING) * avg
                    }
                    None => sample,
                });
                record.healthy = true;
                record.consecutive_probe_failures = 0;
            }
            None => {
                record.healthy = false;
                record.consecutive_probe_failures =
                    record.consecutive_probe_failures.saturating_add(1);
            }
        }
        self.metrics.record_health_probe(provider_id, record.healthy);
    }

    /// Probe one adapter
    ///
    /// Adapters without ping support are skipped and `None` is returned.
    pub async fn probe(&self, adapter: &dyn ProviderAdapter) -> Option<ProviderHealth> {
        if !adapter.supports_ping() {
            return None;
        }
        let provider_id = adapter.provider_id();
        let deadline = Instant::now() + self.config.probe_timeout();
        let timer = TimedOperation::start();

        let outcome = match tokio::time::timeout_at(deadline, adapter.ping(deadline)).await {
            Ok(Ok(())) => {
                debug!(provider = provider_id, latency_ms = timer.elapsed_ms(), "Health probe succeeded");
                Some(timer.elapsed())
            }
            Ok(Err(e)) => {
                warn!(provider = provider_id, error = %e, "Health probe failed");
                None
            }
            Err(_) => {
                warn!(
                    provider = provider_id,
                    timeout_ms = self.config.probe_timeout_ms,
                    "Health probe timed out"
                );
                None
            }
        };

        self.record_probe(provider_id, outcome);
        Some(self.health(provider_id))
    }

    /// Probe every adapter concurrently and return the refreshed records
    pub async fn check_all(&self, adapters: &[Arc<dyn ProviderAdapter>]) -> Vec<ProviderHealth> {
        join_all(adapters.iter().map(|adapter| self.probe(adapter.as_ref())))
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}
