//! Provider Adapter Port
//!
//! A `ProviderAdapter` wraps exactly one vendor API behind a
//! capability-uniform contract. `call` is the only method a new vendor
//! integration must implement; health probes, batch submission and streaming
//! all have defaults.
//!
//! Adapters are expected to translate vendor failures into [`AdapterError`]
//! kinds and to give up on their own once `deadline` has passed. The router
//! enforces the deadline regardless, by dropping the call future.

use crate::error::AdapterError;
use crate::value_objects::{AiRequest, AiResponse, Capability, ResponseChunk};
use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use tokio::time::Instant;

/// Result of a single adapter operation
pub type AdapterResult<T> = std::result::Result<T, AdapterError>;

/// Stream of response chunks
pub type ResponseStream = BoxStream<'static, AdapterResult<ResponseChunk>>;

/// Vendor adapter port
///
/// # Example
///
/// ```ignore
/// let response = adapter
///     .call(Capability::Text, &AiRequest::text("hello"), Instant::now() + timeout)
///     .await?;
/// ```
#[async_trait]
pub trait ProviderAdapter: Send + Sync + std::fmt::Debug {
    /// Identifier of the provider this adapter serves
    ///
    /// Must match the `id` of the provider's configuration entry.
    fn provider_id(&self) -> &str;

    /// Execute one request against the vendor
    async fn call(
        &self,
        capability: Capability,
        request: &AiRequest,
        deadline: Instant,
    ) -> AdapterResult<AiResponse>;

    /// Whether [`ProviderAdapter::ping`] performs a real probe
    fn supports_ping(&self) -> bool {
        false
    }

    /// Lightweight, capability-agnostic liveness probe
    async fn ping(&self, _deadline: Instant) -> AdapterResult<()> {
        Err(AdapterError::unsupported(format!(
            "provider '{}' does not support health probes",
            self.provider_id()
        )))
    }

    /// Whether the vendor accepts several requests of `capability` in one call
    fn supports_batch(&self, _capability: Capability) -> bool {
        false
    }

    /// Submit several requests at once
    ///
    /// The returned vector must have one entry per request, in request order.
    /// An `Err` for the whole call means every member failed with that error.
    /// The default runs the requests one after another through `call`.
    async fn call_batch(
        &self,
        capability: Capability,
        requests: &[AiRequest],
        deadline: Instant,
    ) -> AdapterResult<Vec<AdapterResult<AiResponse>>> {
        let mut results = Vec::with_capacity(requests.len());
        for request in requests {
            results.push(self.call(capability, request, deadline).await);
        }
        Ok(results)
    }

    /// Open a streamed response
    ///
    /// The default performs a regular `call` and yields it as a single
    /// terminal chunk.
    async fn stream(
        &self,
        capability: Capability,
        request: &AiRequest,
        deadline: Instant,
    ) -> AdapterResult<ResponseStream> {
        let response = self.call(capability, request, deadline).await?;
        let chunk = ResponseChunk::from_response(&response);
        Ok(Box::pin(stream::once(async move { Ok(chunk) })))
    }
}
