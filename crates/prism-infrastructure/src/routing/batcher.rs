//! Request batching
//!
//! Groups compatible requests for the same provider and capability into one
//! `call_batch` submission. A queue flushes when it reaches `batch_size` or
//! when `batch_delay` has passed since its first request, whichever comes
//! first. Results are handed back to callers by position.
//!
//! A failure of the whole submission is one vendor call. The flush records
//! it once on the provider's circuit breaker and no member reports it again.

use crate::config::BatchingConfig;
use crate::routing::circuit_breaker::CircuitBreaker;
use crate::routing::metrics::RoutingMetrics;
use dashmap::DashMap;
use prism_domain::error::AdapterError;
use prism_domain::ports::providers::{AdapterResult, ProviderAdapter};
use prism_domain::value_objects::{AiRequest, AiResponse, Capability};
use std::sync::Arc;
use tokio::sync::{Mutex, oneshot};
use tokio::time::Instant;
use tracing::{debug, warn};

type QueueKey = (String, Capability);

/// One member's share of a batch submission
#[derive(Debug)]
pub struct BatchOutcome {
    /// This member's own result
    pub result: AdapterResult<AiResponse>,
    /// Whether the caller still has to report a failure to the breaker
    ///
    /// False when the whole submission failed, since the flush already
    /// recorded it.
    pub counts_for_breaker: bool,
}

impl BatchOutcome {
    pub(crate) fn own(result: AdapterResult<AiResponse>) -> Self {
        Self {
            result,
            counts_for_breaker: true,
        }
    }
}

struct BatchItem {
    request: AiRequest,
    deadline: Instant,
    reply: oneshot::Sender<BatchOutcome>,
}

#[derive(Default)]
struct BatchQueue {
    items: Vec<BatchItem>,
    generation: u64,
}

impl BatchQueue {
    fn take(&mut self) -> Vec<BatchItem> {
        self.generation += 1;
        std::mem::take(&mut self.items)
    }
}

/// Per-(provider, capability) request batcher
pub struct RequestBatcher {
    queues: DashMap<QueueKey, Arc<Mutex<BatchQueue>>>,
    config: BatchingConfig,
    metrics: RoutingMetrics,
}

impl RequestBatcher {
    /// Create a batcher
    pub fn new(config: BatchingConfig) -> Self {
        Self {
            queues: DashMap::new(),
            config,
            metrics: RoutingMetrics::new(),
        }
    }

    /// Batching configuration
    pub fn config(&self) -> &BatchingConfig {
        &self.config
    }

    /// Queue one request and wait for its own result
    pub async fn submit(
        &self,
        adapter: Arc<dyn ProviderAdapter>,
        breaker: &CircuitBreaker,
        capability: Capability,
        request: AiRequest,
        deadline: Instant,
    ) -> BatchOutcome {
        let (reply, receiver) = oneshot::channel();
        let queue = Arc::clone(
            self.queues
                .entry((adapter.provider_id().to_string(), capability))
                .or_default()
                .value(),
        );

        {
            let mut guard = queue.lock().await;
            guard.items.push(BatchItem {
                request,
                deadline,
                reply,
            });

            if guard.items.len() >= self.config.batch_size.max(1) {
                let items = guard.take();
                drop(guard);
                tokio::spawn(flush(adapter, breaker.clone(), capability, items, self.metrics));
            } else if guard.items.len() == 1 {
                let generation = guard.generation;
                let delay = self.config.batch_delay();
                let queue = Arc::clone(&queue);
                let breaker = breaker.clone();
                let metrics = self.metrics;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let items = {
                        let mut guard = queue.lock().await;
                        // A size-triggered flush already took this window
                        if guard.generation != generation || guard.items.is_empty() {
                            return;
                        }
                        guard.take()
                    };
                    flush(adapter, breaker, capability, items, metrics).await;
                });
            }
        }

        receiver.await.unwrap_or_else(|_| {
            BatchOutcome::own(Err(AdapterError::vendor(
                "batch was dropped before completing",
            )))
        })
    }
}

impl std::fmt::Debug for RequestBatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBatcher")
            .field("queues", &self.queues.len())
            .field("config", &self.config)
            .finish()
    }
}

async fn flush(
    adapter: Arc<dyn ProviderAdapter>,
    breaker: CircuitBreaker,
    capability: Capability,
    items: Vec<BatchItem>,
    metrics: RoutingMetrics,
) {
    if items.is_empty() {
        return;
    }
    let provider_id = adapter.provider_id().to_string();
    let deadline = items
        .iter()
        .map(|item| item.deadline)
        .min()
        .unwrap_or_else(Instant::now);
    let (requests, replies): (Vec<_>, Vec<_>) = items
        .into_iter()
        .map(|item| (item.request, item.reply))
        .unzip();

    metrics.record_batch(&provider_id, requests.len());
    debug!(provider = %provider_id, %capability, size = requests.len(), "Submitting batch");

    let started = Instant::now();
    let outcome = match tokio::time::timeout_at(
        deadline,
        adapter.call_batch(capability, &requests, deadline),
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(_) => Err(AdapterError::timeout(started.elapsed())),
    };

    match outcome {
        Ok(results) if results.len() == replies.len() => {
            for (reply, result) in replies.into_iter().zip(results) {
                let _ = reply.send(BatchOutcome::own(result));
            }
        }
        Ok(results) => {
            warn!(
                provider = %provider_id,
                expected = replies.len(),
                received = results.len(),
                "Batch result count mismatch"
            );
            let error = AdapterError::malformed(format!(
                "batch returned {} results for {} requests",
                results.len(),
                replies.len()
            ));
            breaker.record_failure().await;
            fail_all(replies, &error);
        }
        Err(error) => {
            warn!(provider = %provider_id, error = %error, "Batch submission failed");
            breaker.record_failure().await;
            fail_all(replies, &error);
        }
    }
}

fn fail_all(replies: Vec<oneshot::Sender<BatchOutcome>>, error: &AdapterError) {
    for reply in replies {
        let _ = reply.send(BatchOutcome {
            result: Err(error.clone()),
            counts_for_breaker: false,
        });
    }
}
