//! Capability Router
//!
//! [`AiRouter`] sends a capability-typed request through its candidate chain:
//!
//! 1. validate the request against the capability
//! 2. answer from the response cache when allowed
//! 3. attach to an identical in-flight request, or start a new flight
//! 4. walk the candidates (priority order, unhealthy providers last), skipping
//!    open circuits and falling back on every adapter failure
//!
//! Every attempt gets its own `timeout`. An attempt that runs out of time
//! counts as that provider's failure and the chain moves on.

use crate::cache::{CacheKey, SharedResponseCache};
use crate::routing::batcher::{BatchOutcome, RequestBatcher};
use crate::routing::circuit_breaker::{CircuitBreaker, CircuitBreakerMetrics};
use crate::routing::coalescer::{RequestCoalescer, cancelled};
use crate::routing::health::HealthMonitor;
use crate::routing::metrics::RoutingMetrics;
use crate::routing::registry::CapabilityRegistry;
use crate::utils::TimedOperation;
use async_trait::async_trait;
use futures::StreamExt;
use futures::stream;
use prism_domain::error::{AdapterError, AttemptFailure, Result, RouteResult, RouterError};
use prism_domain::ports::infrastructure::routing::{
    CapabilityRouter, CircuitState, ProviderHealth, RouteOptions,
};
use prism_domain::ports::providers::{
    AdapterResult, CacheStats, ProviderAdapter, ResponseStream,
};
use prism_domain::value_objects::{AiRequest, AiResponse, Capability, ResponseChunk};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

/// Point-in-time view of the router
#[derive(Debug, Clone, Serialize)]
pub struct RouterStats {
    /// Registered providers
    pub provider_count: usize,
    /// Providers currently enabled
    pub enabled_providers: Vec<String>,
    /// Current candidate chain per capability
    pub chains: BTreeMap<Capability, Vec<String>>,
    /// Response cache counters
    pub cache: CacheStats,
    /// Distinct requests in flight
    pub pending_requests: usize,
}

pub(crate) struct RouterInner {
    pub(crate) registry: CapabilityRegistry,
    pub(crate) adapters: HashMap<String, Arc<dyn ProviderAdapter>>,
    pub(crate) breakers: HashMap<String, CircuitBreaker>,
    pub(crate) cache: SharedResponseCache,
    pub(crate) coalescer: RequestCoalescer,
    pub(crate) batcher: Option<RequestBatcher>,
    pub(crate) health: Arc<HealthMonitor>,
    pub(crate) metrics: RoutingMetrics,
    pub(crate) default_timeout: Duration,
}

/// Multi-provider capability router
///
/// Build one with [`crate::routing::RouterBuilder`].
///
/// # Example
///
/// ```ignore
/// let router = RouterBuilder::new(config).with_adapter(gemini).build()?;
/// let response = router
///     .route(Capability::Text, AiRequest::text("hello"), router.default_options())
///     .await?;
/// println!("{} answered: {:?}", response.provider_id, response.content.as_text());
/// ```
pub struct AiRouter {
    inner: Arc<RouterInner>,
    shutdown: CancellationToken,
    health_task: Mutex<Option<JoinHandle<()>>>,
}

impl AiRouter {
    pub(crate) fn from_inner(inner: RouterInner) -> Self {
        Self {
            inner: Arc::new(inner),
            shutdown: CancellationToken::new(),
            health_task: Mutex::new(None),
        }
    }

    /// Options carrying the configured default timeout
    pub fn default_options(&self) -> RouteOptions {
        RouteOptions::default().with_timeout(self.inner.default_timeout)
    }

    /// Provider registry
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.inner.registry
    }

    /// Response cache
    pub fn cache(&self) -> &SharedResponseCache {
        &self.inner.cache
    }

    /// Health monitor
    pub fn health_monitor(&self) -> &HealthMonitor {
        &self.inner.health
    }

    /// Enable or disable a provider at runtime
    pub fn set_provider_enabled(&self, provider_id: &str, enabled: bool) -> Result<()> {
        self.inner.registry.set_enabled(provider_id, enabled)
    }

    /// Breaker counters of one provider
    pub async fn breaker_metrics(&self, provider_id: &str) -> Option<CircuitBreakerMetrics> {
        match self.inner.breakers.get(provider_id) {
            Some(breaker) => Some(breaker.metrics().await),
            None => None,
        }
    }

    /// Run one probe round over every enabled provider now
    pub async fn check_health(&self) -> Vec<ProviderHealth> {
        self.inner.check_health().await
    }

    /// Snapshot of registry, cache and in-flight state
    pub async fn stats(&self) -> RouterStats {
        let cache = match self.inner.cache.stats().await {
            Ok(stats) => stats,
            Err(e) => {
                warn!(error = %e, "Failed to read cache statistics");
                CacheStats::default()
            }
        };
        RouterStats {
            provider_count: self.inner.registry.len(),
            enabled_providers: self.inner.registry.enabled_provider_ids(),
            chains: self.inner.registry.chains(),
            cache,
            pending_requests: self.inner.coalescer.pending_count(),
        }
    }

    /// Start periodic health probes
    ///
    /// Does nothing if the monitor is already running.
    pub fn start_health_monitor(&self) {
        let mut slot = self
            .health_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return;
        }

        let inner = Arc::clone(&self.inner);
        let shutdown = self.shutdown.child_token();
        let interval = inner.health.config().interval();
        info!(interval_secs = interval.as_secs(), "Starting health monitor");

        *slot = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    () = shutdown.cancelled() => break,
                    _ = ticker.tick() => {
                        inner.check_health().await;
                    }
                }
            }
            debug!("Health monitor stopped");
        }));
    }

    /// Stop background work
    ///
    /// Routing keeps working afterwards; only periodic probes stop.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();
        let task = self
            .health_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            let _ = task.await;
        }
        info!("Router shut down");
    }

    async fn route_flight(
        &self,
        capability: Capability,
        request: AiRequest,
        options: RouteOptions,
    ) -> RouteResult<Arc<AiResponse>> {
        request.validate_for(capability)?;
        if options.cancellation.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(RouterError::Cancelled);
        }
        if self.inner.registry.candidates(capability).is_empty() {
            return Err(RouterError::NoCapableProvider { capability });
        }

        let key = CacheKey::for_request(capability, &request);

        if options.allow_cache {
            if let Some(hit) = self.inner.cached(&key).await {
                debug!(provider = %hit.provider_id, "Served from cache");
                return Ok(hit);
            }
        }

        let inner = Arc::clone(&self.inner);
        let flight_key = key.clone();
        let timeout = options.timeout;
        let store = options.allow_cache;
        let subscription = self.inner.coalescer.join(&key, move |abandon| {
            inner.run_chain(FlightPlan {
                capability,
                request,
                timeout,
                cache_key: store.then_some(flight_key),
                abandon,
            })
        });

        if subscription.joined() {
            self.inner.metrics.record_coalesced(capability);
        }
        self.inner
            .metrics
            .set_pending(self.inner.coalescer.pending_count());

        subscription.wait(options.cancellation.as_ref()).await
    }

    async fn open_stream(
        &self,
        capability: Capability,
        request: AiRequest,
        options: RouteOptions,
    ) -> RouteResult<ResponseStream> {
        request.validate_for(capability)?;
        let candidates = self
            .inner
            .registry
            .ranked_candidates(capability, &self.inner.health);
        if candidates.is_empty() {
            return Err(RouterError::NoCapableProvider { capability });
        }

        let cancellation = options.cancellation.clone();
        let mut causes = Vec::new();

        for provider_id in candidates {
            if cancellation.as_ref().is_some_and(CancellationToken::is_cancelled) {
                return Err(RouterError::Cancelled);
            }
            let Some((adapter, breaker)) = self.inner.provider(&provider_id) else {
                continue;
            };
            if !breaker.allow().await {
                self.inner.metrics.record_circuit_rejection(&provider_id);
                debug!(provider = %provider_id, "Circuit open, skipping stream candidate");
                continue;
            }

            let deadline = Instant::now() + options.timeout;
            let timer = TimedOperation::start();
            let opened = tokio::select! {
                biased;
                () = cancelled(cancellation.as_ref()) => None,
                opened = tokio::time::timeout_at(deadline, adapter.stream(capability, &request, deadline)) => Some(opened),
            };
            let Some(opened) = opened else {
                // Nobody learns how the attempt would have ended; the trial
                // lease lapses on its own if this was a half-open probe
                return Err(RouterError::Cancelled);
            };

            match opened {
                Ok(Ok(inner_stream)) => {
                    breaker.record_success().await;
                    self.inner.metrics.record_attempt(
                        &provider_id,
                        capability,
                        "success",
                        timer.elapsed_secs(),
                    );
                    info!(provider = %provider_id, %capability, "Stream opened");
                    return Ok(guard_stream(
                        inner_stream,
                        deadline,
                        options.timeout,
                        cancellation,
                    ));
                }
                Ok(Err(error)) => {
                    breaker.record_failure().await;
                    self.inner.metrics.record_attempt(
                        &provider_id,
                        capability,
                        error.kind(),
                        timer.elapsed_secs(),
                    );
                    warn!(provider = %provider_id, %capability, error = %error, "Stream attempt failed, falling back");
                    causes.push(AttemptFailure::new(provider_id, error));
                }
                Err(_) => {
                    breaker.record_failure().await;
                    self.inner.metrics.record_attempt(
                        &provider_id,
                        capability,
                        "timeout",
                        timer.elapsed_secs(),
                    );
                    warn!(provider = %provider_id, %capability, timeout_ms = options.timeout.as_millis(), "Stream open timed out, falling back");
                    causes.push(AttemptFailure::new(
                        provider_id,
                        AdapterError::timeout(options.timeout),
                    ));
                }
            }
        }

        Err(exhausted(capability, causes, options.timeout))
    }
}

impl Drop for AiRouter {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl std::fmt::Debug for AiRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiRouter")
            .field("registry", &self.inner.registry)
            .field("cache", &self.inner.cache)
            .field("coalescer", &self.inner.coalescer)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CapabilityRouter for AiRouter {
    async fn route(
        &self,
        capability: Capability,
        request: AiRequest,
        options: RouteOptions,
    ) -> RouteResult<Arc<AiResponse>> {
        let span = info_span!("route", route_id = %Uuid::new_v4(), %capability);
        async {
            let timer = TimedOperation::start();
            let result = self.route_flight(capability, request, options).await;
            let outcome = match &result {
                Ok(_) => "success",
                Err(e) => e.kind(),
            };
            self.inner
                .metrics
                .record_route(capability, outcome, timer.elapsed_secs());
            self.inner
                .metrics
                .set_pending(self.inner.coalescer.pending_count());
            match &result {
                Ok(response) => {
                    debug!(provider = %response.provider_id, elapsed_ms = timer.elapsed_ms(), "Route completed");
                }
                Err(e) => {
                    warn!(error = %e, elapsed_ms = timer.elapsed_ms(), "Route failed");
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn route_stream(
        &self,
        capability: Capability,
        request: AiRequest,
        options: RouteOptions,
    ) -> RouteResult<ResponseStream> {
        let span = info_span!("route_stream", route_id = %Uuid::new_v4(), %capability);
        async {
            let timer = TimedOperation::start();
            let result = self.open_stream(capability, request, options).await;
            let outcome = match &result {
                Ok(_) => "success",
                Err(e) => e.kind(),
            };
            self.inner
                .metrics
                .record_route(capability, outcome, timer.elapsed_secs());
            result
        }
        .instrument(span)
        .await
    }

    async fn circuit_states(&self) -> Vec<CircuitState> {
        let mut states = Vec::with_capacity(self.inner.breakers.len());
        for provider_id in self.inner.registry.provider_ids() {
            if let Some(breaker) = self.inner.breakers.get(&provider_id) {
                states.push(breaker.state().await);
            }
        }
        states
    }

    fn provider_health(&self) -> Vec<ProviderHealth> {
        self.inner
            .registry
            .provider_ids()
            .iter()
            .map(|id| self.inner.health.health(id))
            .collect()
    }
}

/// Everything one flight needs, owned so it can run detached from callers
struct FlightPlan {
    capability: Capability,
    request: AiRequest,
    timeout: Duration,
    cache_key: Option<String>,
    abandon: CancellationToken,
}

impl RouterInner {
    fn provider(&self, provider_id: &str) -> Option<(&Arc<dyn ProviderAdapter>, &CircuitBreaker)> {
        Some((
            self.adapters.get(provider_id)?,
            self.breakers.get(provider_id)?,
        ))
    }

    async fn cached(&self, key: &str) -> Option<Arc<AiResponse>> {
        let hit = match self.cache.get(key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(error = %e, "Cache lookup failed");
                None
            }
        };
        self.metrics.record_cache_lookup(hit.is_some());
        hit
    }

    async fn check_health(&self) -> Vec<ProviderHealth> {
        let adapters: Vec<_> = self
            .registry
            .enabled_provider_ids()
            .iter()
            .filter_map(|id| self.adapters.get(id).cloned())
            .collect();
        self.health.check_all(&adapters).await
    }

    async fn run_chain(self: Arc<Self>, plan: FlightPlan) -> RouteResult<Arc<AiResponse>> {
        let FlightPlan {
            capability,
            request,
            timeout,
            cache_key,
            abandon,
        } = plan;

        // Another flight may have stored this response since the caller looked
        if let Some(key) = &cache_key {
            if let Some(hit) = self.cached(key).await {
                debug!(provider = %hit.provider_id, "Served from cache after joining");
                return Ok(hit);
            }
        }

        let candidates = self.registry.ranked_candidates(capability, &self.health);
        if candidates.is_empty() {
            return Err(RouterError::NoCapableProvider { capability });
        }

        let mut causes = Vec::new();
        for provider_id in candidates {
            if abandon.is_cancelled() {
                debug!(%capability, "Flight abandoned, no further fallbacks");
                return Err(RouterError::Cancelled);
            }
            let Some((adapter, breaker)) = self.provider(&provider_id) else {
                continue;
            };
            if !breaker.allow().await {
                self.metrics.record_circuit_rejection(&provider_id);
                debug!(provider = %provider_id, "Circuit open, skipping candidate");
                continue;
            }

            let timer = TimedOperation::start();
            let outcome = self
                .attempt(adapter, breaker, capability, &request, timeout)
                .await;

            match outcome.result {
                Ok(response) => {
                    breaker.record_success().await;
                    self.metrics.record_attempt(
                        &provider_id,
                        capability,
                        "success",
                        timer.elapsed_secs(),
                    );
                    let response = Arc::new(response);
                    if let Some(key) = &cache_key {
                        if let Err(e) = self.cache.put(key, Arc::clone(&response)).await {
                            warn!(error = %e, "Failed to cache response");
                        }
                    }
                    info!(provider = %provider_id, %capability, latency_ms = timer.elapsed_ms(), "Provider answered");
                    return Ok(response);
                }
                Err(error) => {
                    if outcome.counts_for_breaker {
                        breaker.record_failure().await;
                    }
                    self.metrics.record_attempt(
                        &provider_id,
                        capability,
                        error.kind(),
                        timer.elapsed_secs(),
                    );
                    warn!(provider = %provider_id, %capability, error = %error, "Provider attempt failed, falling back");
                    causes.push(AttemptFailure::new(provider_id, error));
                }
            }
        }

        Err(exhausted(capability, causes, timeout))
    }

    /// One attempt on one provider, bounded by its own deadline
    async fn attempt(
        &self,
        adapter: &Arc<dyn ProviderAdapter>,
        breaker: &CircuitBreaker,
        capability: Capability,
        request: &AiRequest,
        timeout: Duration,
    ) -> BatchOutcome {
        let deadline = Instant::now() + timeout;
        match &self.batcher {
            Some(batcher) if adapter.supports_batch(capability) => {
                let submitted = batcher.submit(
                    Arc::clone(adapter),
                    breaker,
                    capability,
                    request.clone(),
                    deadline,
                );
                // A stalled batch times out in its flush, which records it
                tokio::time::timeout_at(deadline, submitted)
                    .await
                    .unwrap_or_else(|_| BatchOutcome {
                        result: Err(AdapterError::timeout(timeout)),
                        counts_for_breaker: false,
                    })
            }
            _ => BatchOutcome::own(
                tokio::time::timeout_at(deadline, adapter.call(capability, request, deadline))
                    .await
                    .unwrap_or_else(|_| Err(AdapterError::timeout(timeout))),
            ),
        }
    }
}

/// Error for a chain that ran out of candidates
///
/// A chain whose last attempt timed out reports the timeout; the earlier
/// causes are in the WARN log of each attempt.
fn exhausted(capability: Capability, causes: Vec<AttemptFailure>, timeout: Duration) -> RouterError {
    match causes.last() {
        None => RouterError::CircuitOpenForAll { capability },
        Some(last) if matches!(last.error, AdapterError::Timeout { .. }) => {
            RouterError::Timeout { timeout }
        }
        Some(_) => RouterError::AllProvidersFailed { capability, causes },
    }
}

enum StreamStep {
    Item(Option<AdapterResult<ResponseChunk>>),
    Cancelled,
    Expired,
}

/// Bound an opened stream by its attempt deadline and caller cancellation
///
/// Cancellation ends the stream quietly; an elapsed deadline yields one
/// timeout error and then ends it.
fn guard_stream(
    inner: ResponseStream,
    deadline: Instant,
    timeout: Duration,
    cancellation: Option<CancellationToken>,
) -> ResponseStream {
    stream::unfold(
        Some((inner, cancellation)),
        move |state| async move {
            let (mut inner, cancellation) = state?;
            let step = tokio::select! {
                biased;
                () = cancelled(cancellation.as_ref()) => StreamStep::Cancelled,
                () = tokio::time::sleep_until(deadline) => StreamStep::Expired,
                item = inner.next() => StreamStep::Item(item),
            };
            match step {
                StreamStep::Item(Some(item)) => Some((item, Some((inner, cancellation)))),
                StreamStep::Item(None) | StreamStep::Cancelled => None,
                StreamStep::Expired => Some((Err(AdapterError::timeout(timeout)), None)),
            }
        },
    )
    .boxed()
}
