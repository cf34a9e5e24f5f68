//! Request coalescing
//!
//! Identical requests that arrive while one is already in flight attach to
//! that flight instead of starting their own. Every subscriber receives the
//! same `Arc<AiResponse>` (or the same error).
//!
//! The flight runs in its own task, so a subscriber leaving never aborts it.
//! When the last subscriber leaves, the flight's abandon token is cancelled:
//! the producer finishes the attempt already in progress but issues no
//! further fallbacks.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::future::{BoxFuture, FutureExt, Shared};
use prism_domain::error::{RouteResult, RouterError};
use prism_domain::value_objects::AiResponse;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

type SharedRoute = Shared<BoxFuture<'static, RouteResult<Arc<AiResponse>>>>;

struct Pending {
    generation: u64,
    future: SharedRoute,
    subscribers: usize,
    abandon: CancellationToken,
}

/// In-flight request registry
pub struct RequestCoalescer {
    pending: Arc<DashMap<String, Pending>>,
    next_generation: AtomicU64,
}

impl RequestCoalescer {
    /// Create an empty coalescer
    pub fn new() -> Self {
        Self {
            pending: Arc::new(DashMap::new()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Number of distinct requests in flight
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Subscribe to the flight for `key`, starting it with `producer` if none
    /// is running
    ///
    /// `producer` receives the flight's abandon token and must be called from
    /// within a Tokio runtime.
    pub fn join<F, Fut>(&self, key: &str, producer: F) -> Subscription
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = RouteResult<Arc<AiResponse>>> + Send + 'static,
    {
        // Subscriber counts only change under the entry lock, so a flight
        // cannot be abandoned while someone is attaching to it
        match self.pending.entry(key.to_string()) {
            Entry::Occupied(mut entry) if !entry.get().abandon.is_cancelled() => {
                let pending = entry.get_mut();
                pending.subscribers += 1;
                debug!(key, subscribers = pending.subscribers, "Joined in-flight request");
                Subscription {
                    future: pending.future.clone(),
                    joined: true,
                    _guard: self.guard(key, pending.generation),
                }
            }
            entry => {
                let pending = self.start(key, producer);
                let subscription = Subscription {
                    future: pending.future.clone(),
                    joined: false,
                    _guard: self.guard(key, pending.generation),
                };
                match entry {
                    Entry::Occupied(mut occupied) => {
                        occupied.insert(pending);
                    }
                    Entry::Vacant(vacant) => {
                        vacant.insert(pending);
                    }
                }
                subscription
            }
        }
    }

    fn start<F, Fut>(&self, key: &str, producer: F) -> Pending
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = RouteResult<Arc<AiResponse>>> + Send + 'static,
    {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let abandon = CancellationToken::new();
        let flight = producer(abandon.clone());

        let pending = Arc::clone(&self.pending);
        let owned_key = key.to_string();
        let handle = tokio::spawn(async move {
            let result = flight.await;
            // The flight leaves the registry before anyone sees its result
            pending.remove_if(&owned_key, |_, p| p.generation == generation);
            result
        });

        let future = async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => {
                    error!(error = %e, "Coalesced request task failed");
                    Err(RouterError::Cancelled)
                }
            }
        }
        .boxed()
        .shared();

        Pending {
            generation,
            future,
            subscribers: 1,
            abandon,
        }
    }

    fn guard(&self, key: &str, generation: u64) -> SubscriberGuard {
        SubscriberGuard {
            pending: Arc::clone(&self.pending),
            key: key.to_string(),
            generation,
        }
    }
}

impl Default for RequestCoalescer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RequestCoalescer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestCoalescer")
            .field("pending", &self.pending.len())
            .finish()
    }
}

/// One caller's interest in a flight
pub struct Subscription {
    future: SharedRoute,
    joined: bool,
    _guard: SubscriberGuard,
}

impl Subscription {
    /// Whether this caller attached to a flight started by someone else
    pub fn joined(&self) -> bool {
        self.joined
    }

    /// Wait for the flight or this caller's own cancellation
    ///
    /// The flight bounds each of its attempts, so no separate deadline
    /// applies here.
    pub async fn wait(self, cancellation: Option<&CancellationToken>) -> RouteResult<Arc<AiResponse>> {
        let Subscription { future, _guard, .. } = self;
        tokio::select! {
            biased;
            result = future => result,
            () = cancelled(cancellation) => Err(RouterError::Cancelled),
        }
    }
}

/// Resolves when `token` is cancelled; never resolves without a token
pub(crate) async fn cancelled(token: Option<&CancellationToken>) {
    match token {
        Some(token) => token.cancelled().await,
        None => std::future::pending().await,
    }
}

struct SubscriberGuard {
    pending: Arc<DashMap<String, Pending>>,
    key: String,
    generation: u64,
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        if let Some(mut pending) = self.pending.get_mut(&self.key) {
            if pending.generation != self.generation {
                return;
            }
            pending.subscribers = pending.subscribers.saturating_sub(1);
            if pending.subscribers == 0 {
                debug!(key = %self.key, "Every caller left, abandoning remaining fallbacks");
                pending.abandon.cancel();
            }
        }
    }
}
