//! Null adapter for testing and dry runs
//!
//! Answers every capability deterministically from the request itself. No
//! network access, always works offline.

use async_trait::async_trait;
use prism_domain::error::AdapterError;
use prism_domain::ports::providers::{AdapterResult, ProviderAdapter};
use prism_domain::value_objects::{
    AiRequest, AiResponse, Capability, ResponseContent, SearchResult, UsageMetrics,
};
use std::time::Duration;
use tokio::time::Instant;

use crate::constants::{NULL_ADAPTER_IMAGE_MIME, NULL_ADAPTER_MODEL};

/// Null adapter for testing
///
/// Text-like capabilities echo the prompt prefixed with the provider id;
/// image generation returns the prompt bytes as a fake image and search
/// returns a single synthetic hit. An optional artificial latency makes the
/// adapter useful for timeout and health-probe experiments.
///
/// # Example
///
/// ```rust
/// use prism_providers::adapters::NullAdapter;
/// use prism_domain::ProviderAdapter;
///
/// let adapter = NullAdapter::new("dry-run");
/// assert_eq!(adapter.provider_id(), "dry-run");
/// assert!(adapter.supports_ping());
/// ```
#[derive(Debug, Clone)]
pub struct NullAdapter {
    provider_id: String,
    latency: Duration,
}

impl NullAdapter {
    /// Create a null adapter answering as `provider_id`
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            latency: Duration::ZERO,
        }
    }

    /// Delay every call and probe by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self, deadline: Instant) -> AdapterResult<()> {
        if self.latency.is_zero() {
            return Ok(());
        }

        let started = Instant::now();
        if started + self.latency > deadline {
            tokio::time::sleep_until(deadline).await;
            return Err(AdapterError::timeout(started.elapsed()));
        }
        tokio::time::sleep(self.latency).await;
        Ok(())
    }

    fn answer(&self, capability: Capability, request: &AiRequest) -> AiResponse {
        let prompt = request.prompt().unwrap_or_default().trim();
        let content = match capability {
            Capability::ImageGen => ResponseContent::Image {
                data: prompt.as_bytes().to_vec(),
                mime_type: NULL_ADAPTER_IMAGE_MIME.to_string(),
            },
            Capability::Search => ResponseContent::SearchResults {
                results: vec![SearchResult {
                    title: prompt.to_string(),
                    url: format!("null://{}/{}", self.provider_id, request.fingerprint()),
                    snippet: format!("[{}] {}", self.provider_id, prompt),
                }],
            },
            Capability::Text | Capability::Vision | Capability::Audio => {
                ResponseContent::text(format!("[{}] {}", self.provider_id, prompt))
            }
        };

        let words = u32::try_from(prompt.split_whitespace().count()).unwrap_or(u32::MAX);
        AiResponse {
            provider_id: self.provider_id.clone(),
            capability,
            content,
            model: Some(NULL_ADAPTER_MODEL.to_string()),
            usage: Some(UsageMetrics {
                input_tokens: words,
                output_tokens: words.saturating_add(1),
            }),
        }
    }
}

#[async_trait]
impl ProviderAdapter for NullAdapter {
    fn provider_id(&self) -> &str {
        &self.provider_id
    }

    async fn call(
        &self,
        capability: Capability,
        request: &AiRequest,
        deadline: Instant,
    ) -> AdapterResult<AiResponse> {
        if request.capability() != capability {
            return Err(AdapterError::unsupported(format!(
                "'{}' payload sent as '{}'",
                request.capability(),
                capability
            )));
        }
        self.simulate_latency(deadline).await?;
        Ok(self.answer(capability, request))
    }

    fn supports_ping(&self) -> bool {
        true
    }

    async fn ping(&self, deadline: Instant) -> AdapterResult<()> {
        self.simulate_latency(deadline).await
    }

    fn supports_batch(&self, _capability: Capability) -> bool {
        true
    }

    async fn call_batch(
        &self,
        capability: Capability,
        requests: &[AiRequest],
        deadline: Instant,
    ) -> AdapterResult<Vec<AdapterResult<AiResponse>>> {
        self.simulate_latency(deadline).await?;
        Ok(requests
            .iter()
            .map(|request| {
                if request.capability() == capability {
                    Ok(self.answer(capability, request))
                } else {
                    Err(AdapterError::unsupported(format!(
                        "'{}' payload in a '{}' batch",
                        request.capability(),
                        capability
                    )))
                }
            })
            .collect())
    }
}
