//! Provider responses

use crate::value_objects::Capability;
use serde::{Deserialize, Serialize};

/// Token accounting reported by a vendor, when available
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetrics {
    /// Tokens consumed by the prompt
    pub input_tokens: u32,
    /// Tokens produced by the model
    pub output_tokens: u32,
}

impl UsageMetrics {
    /// Total tokens billed for the call
    pub fn total(&self) -> u32 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

/// One web search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page title
    pub title: String,
    /// Page URL
    pub url: String,
    /// Short excerpt
    pub snippet: String,
}

/// Payload of a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseContent {
    /// Generated or extracted text
    Text {
        /// The text
        text: String,
    },
    /// Generated image
    Image {
        /// Encoded image bytes
        data: Vec<u8>,
        /// MIME type of `data`
        mime_type: String,
    },
    /// Search hits
    SearchResults {
        /// Ordered results
        results: Vec<SearchResult>,
    },
}

impl ResponseContent {
    /// Text payload
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Text carried by the payload, if it is a text payload
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Response produced by a provider adapter
///
/// Responses are immutable once produced. The router hands them out behind an
/// `Arc` so coalesced callers and the cache share one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiResponse {
    /// Provider that produced the response
    pub provider_id: String,
    /// Capability that was served
    pub capability: Capability,
    /// Payload
    pub content: ResponseContent,
    /// Vendor model identifier, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Token accounting, when reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageMetrics>,
}

impl AiResponse {
    /// Create a text response
    pub fn text(
        provider_id: impl Into<String>,
        capability: Capability,
        text: impl Into<String>,
    ) -> Self {
        Self {
            provider_id: provider_id.into(),
            capability,
            content: ResponseContent::text(text),
            model: None,
            usage: None,
        }
    }

    /// Attach the vendor model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Attach token accounting
    pub fn with_usage(mut self, usage: UsageMetrics) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// Incremental piece of a streamed response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseChunk {
    /// Provider producing the stream
    pub provider_id: String,
    /// Position of the chunk in the stream, starting at zero
    pub index: u32,
    /// Text appended by this chunk
    pub delta: String,
    /// Whether this is the last chunk
    pub done: bool,
}

impl ResponseChunk {
    /// Single terminal chunk carrying a whole response
    ///
    /// Non-text payloads yield an empty delta.
    pub fn from_response(response: &AiResponse) -> Self {
        Self {
            provider_id: response.provider_id.clone(),
            index: 0,
            delta: response.content.as_text().unwrap_or_default().to_string(),
            done: true,
        }
    }
}
