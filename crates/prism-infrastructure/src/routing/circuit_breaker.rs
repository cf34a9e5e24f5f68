//! Circuit Breaker Module
//!
//! One breaker per provider, implemented as an actor: a spawned task owns the
//! state and processes messages one at a time, so every transition and the
//! HALF_OPEN trial claim are atomic without locks.
//!
//! ```text
//! CLOSED --(failure_threshold consecutive failures)--> OPEN
//! OPEN   --(reset_timeout elapsed, checked on access)--> HALF_OPEN
//! HALF_OPEN --(trial success)--> CLOSED
//! HALF_OPEN --(trial failure)--> OPEN
//! ```

use crate::config::ResilienceConfig;
use crate::routing::metrics::RoutingMetrics;
use chrono::{DateTime, Utc};
use prism_domain::constants::{
    CIRCUIT_BREAKER_FAILURE_THRESHOLD, CIRCUIT_BREAKER_MAILBOX_SIZE,
    CIRCUIT_BREAKER_RESET_TIMEOUT_MS,
};
use prism_domain::ports::infrastructure::routing::{CircuitState, CircuitStatus};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Circuit breaker configuration
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Number of consecutive failures before opening the circuit
    pub failure_threshold: u32,
    /// Time an open circuit waits before allowing a trial call
    pub reset_timeout: Duration,
}

impl CircuitBreakerConfig {
    /// Create a new circuit breaker configuration with explicit values
    pub fn new(failure_threshold: u32, reset_timeout: Duration) -> Self {
        Self {
            failure_threshold,
            reset_timeout,
        }
    }
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: CIRCUIT_BREAKER_FAILURE_THRESHOLD,
            reset_timeout: Duration::from_millis(CIRCUIT_BREAKER_RESET_TIMEOUT_MS),
        }
    }
}

impl From<&ResilienceConfig> for CircuitBreakerConfig {
    fn from(config: &ResilienceConfig) -> Self {
        Self::new(config.failure_threshold, config.reset_timeout())
    }
}

/// Circuit breaker metrics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CircuitBreakerMetrics {
    /// Outcomes recorded (successes plus failures)
    pub total_requests: u64,
    /// Successful outcomes
    pub successful_requests: u64,
    /// Failed outcomes
    pub failed_requests: u64,
    /// Calls refused by `allow`
    pub rejected_requests: u64,
    /// Transitions into OPEN
    pub circuit_opened_count: u32,
    /// Transitions from HALF_OPEN back to CLOSED
    pub circuit_closed_count: u32,
}

/// Messages for the circuit breaker actor
enum CBMessage {
    Allow(oneshot::Sender<bool>),
    OnSuccess,
    OnFailure,
    GetState(oneshot::Sender<CircuitState>),
    GetMetrics(oneshot::Sender<CircuitBreakerMetrics>),
}

/// Handle to one provider's circuit breaker actor
///
/// Must be created inside a Tokio runtime. The actor stops once every handle
/// is dropped.
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    provider_id: String,
    sender: mpsc::Sender<CBMessage>,
}

impl CircuitBreaker {
    /// Spawn a breaker for `provider_id`
    pub fn new(provider_id: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self::with_metrics(provider_id, config, RoutingMetrics::new())
    }

    /// Spawn a breaker reporting state changes to `metrics`
    pub fn with_metrics(
        provider_id: impl Into<String>,
        config: CircuitBreakerConfig,
        metrics: RoutingMetrics,
    ) -> Self {
        let provider_id = provider_id.into();
        let (tx, rx) = mpsc::channel(CIRCUIT_BREAKER_MAILBOX_SIZE);

        let mut actor = CircuitBreakerActor::new(provider_id.clone(), rx, config, metrics);
        tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            provider_id,
            sender: tx,
        }
    }

    /// Provider guarded by this breaker
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    /// Whether a call may be made now
    ///
    /// In HALF_OPEN a `true` answer claims the single trial slot; the caller
    /// must report the outcome with `record_success` or `record_failure`.
    pub async fn allow(&self) -> bool {
        let (tx, rx) = oneshot::channel();
        if self.sender.send(CBMessage::Allow(tx)).await.is_err() {
            return false;
        }
        rx.await.unwrap_or(false)
    }

    /// Record a successful call
    pub async fn record_success(&self) {
        let _ = self.sender.send(CBMessage::OnSuccess).await;
    }

    /// Record a failed call
    pub async fn record_failure(&self) {
        let _ = self.sender.send(CBMessage::OnFailure).await;
    }

    /// Snapshot of the breaker state
    pub async fn state(&self) -> CircuitState {
        let (tx, rx) = oneshot::channel();
        let _ = self.sender.send(CBMessage::GetState(tx)).await;
        rx.await.unwrap_or_else(|_| CircuitState {
            provider_id: self.provider_id.clone(),
            state: CircuitStatus::Closed,
            consecutive_failures: 0,
            last_failure_at: None,
            last_state_change_at: Utc::now(),
        })
    }

    /// Counters accumulated by the breaker
    pub async fn metrics(&self) -> CircuitBreakerMetrics {
        let (tx, rx) = oneshot::channel();
        let _ = self.sender.send(CBMessage::GetMetrics(tx)).await;
        rx.await.unwrap_or_default()
    }
}

struct CircuitBreakerActor {
    provider_id: String,
    receiver: mpsc::Receiver<CBMessage>,
    config: CircuitBreakerConfig,
    routing_metrics: RoutingMetrics,
    status: CircuitStatus,
    consecutive_failures: u32,
    opened_at: Option<Instant>,
    trial_claimed_at: Option<Instant>,
    last_failure_at: Option<DateTime<Utc>>,
    last_state_change_at: DateTime<Utc>,
    metrics: CircuitBreakerMetrics,
}

impl CircuitBreakerActor {
    fn new(
        provider_id: String,
        receiver: mpsc::Receiver<CBMessage>,
        config: CircuitBreakerConfig,
        routing_metrics: RoutingMetrics,
    ) -> Self {
        Self {
            provider_id,
            receiver,
            config,
            routing_metrics,
            status: CircuitStatus::Closed,
            consecutive_failures: 0,
            opened_at: None,
            trial_claimed_at: None,
            last_failure_at: None,
            last_state_change_at: Utc::now(),
            metrics: CircuitBreakerMetrics::default(),
        }
    }

    async fn run(&mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CBMessage::Allow(tx) => {
                    let allowed = self.allow();
                    let _ = tx.send(allowed);
                }
                CBMessage::OnSuccess => self.on_success(),
                CBMessage::OnFailure => self.on_failure(),
                CBMessage::GetState(tx) => {
                    self.check_state_transition();
                    let _ = tx.send(self.snapshot());
                }
                CBMessage::GetMetrics(tx) => {
                    let _ = tx.send(self.metrics.clone());
                }
            }
        }
        debug!(provider = %self.provider_id, "Circuit breaker actor stopped");
    }

    fn allow(&mut self) -> bool {
        self.check_state_transition();
        let allowed = match self.status {
            CircuitStatus::Closed => true,
            CircuitStatus::Open => false,
            CircuitStatus::HalfOpen => {
                // A claimed trial that never reported back lapses after reset_timeout
                let slot_free = self
                    .trial_claimed_at
                    .is_none_or(|claimed| claimed.elapsed() >= self.config.reset_timeout);
                if slot_free {
                    self.trial_claimed_at = Some(Instant::now());
                    debug!(provider = %self.provider_id, "Half-open trial claimed");
                }
                slot_free
            }
        };
        if !allowed {
            self.metrics.rejected_requests += 1;
        }
        allowed
    }

    fn on_success(&mut self) {
        self.metrics.total_requests += 1;
        self.metrics.successful_requests += 1;
        self.consecutive_failures = 0;

        if self.status == CircuitStatus::HalfOpen {
            info!(provider = %self.provider_id, "Circuit breaker trial succeeded, closing");
            self.metrics.circuit_closed_count += 1;
            self.transition(CircuitStatus::Closed);
        }
    }

    fn on_failure(&mut self) {
        self.metrics.total_requests += 1;
        self.metrics.failed_requests += 1;
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.last_failure_at = Some(Utc::now());

        match self.status {
            CircuitStatus::Closed
                if self.consecutive_failures >= self.config.failure_threshold =>
            {
                warn!(
                    provider = %self.provider_id,
                    failures = self.consecutive_failures,
                    "Circuit breaker opening"
                );
                self.open();
            }
            CircuitStatus::HalfOpen => {
                warn!(provider = %self.provider_id, "Circuit breaker trial failed, reopening");
                self.open();
            }
            _ => {}
        }
    }

    fn open(&mut self) {
        self.opened_at = Some(Instant::now());
        self.metrics.circuit_opened_count += 1;
        self.transition(CircuitStatus::Open);
    }

    fn check_state_transition(&mut self) {
        if self.status != CircuitStatus::Open {
            return;
        }
        let elapsed = self
            .opened_at
            .is_none_or(|opened_at| opened_at.elapsed() >= self.config.reset_timeout);
        if elapsed {
            info!(provider = %self.provider_id, "Circuit breaker transitioning to half-open");
            self.transition(CircuitStatus::HalfOpen);
        }
    }

    fn transition(&mut self, status: CircuitStatus) {
        self.status = status;
        self.trial_claimed_at = None;
        self.last_state_change_at = Utc::now();
        self.routing_metrics
            .record_circuit_state(&self.provider_id, status);
    }

    fn snapshot(&self) -> CircuitState {
        CircuitState {
            provider_id: self.provider_id.clone(),
            state: self.status,
            consecutive_failures: self.consecutive_failures,
            last_failure_at: self.last_failure_at,
            last_state_change_at: self.last_state_change_at,
        }
    }
}
