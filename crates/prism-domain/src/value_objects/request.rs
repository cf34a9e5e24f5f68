//! Capability-specific request payloads
//!
//! Each capability has its own request shape; [`AiRequest`] is the closed sum
//! of all of them. The router never inspects prompts beyond validation and
//! fingerprinting.

use crate::error::{RouteResult, RouterError};
use crate::value_objects::Capability;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Text generation request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRequest {
    /// Prompt text
    pub prompt: String,
    /// Upper bound on generated tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl TextRequest {
    /// Create a text request without a token limit
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: None,
        }
    }

    /// Limit the number of generated tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Image analysis request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisionRequest {
    /// Encoded image
    pub image_bytes: Vec<u8>,
    /// MIME type of `image_bytes` (e.g. `image/jpeg`)
    pub mime_type: String,
    /// Instruction for the analysis
    pub prompt: String,
}

/// Audio analysis request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioRequest {
    /// Encoded audio
    pub audio_bytes: Vec<u8>,
    /// MIME type of `audio_bytes` (e.g. `audio/wav`)
    pub mime_type: String,
    /// Optional instruction for the analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// Web search request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Search query
    pub query: String,
}

/// Image generation request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageGenRequest {
    /// Description of the image to generate
    pub prompt: String,
    /// Optional reference image to guide generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_image_bytes: Option<Vec<u8>>,
}

/// Request payload routed to a provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "capability", rename_all = "snake_case")]
pub enum AiRequest {
    /// Text generation
    Text(TextRequest),
    /// Image analysis
    Vision(VisionRequest),
    /// Audio analysis
    Audio(AudioRequest),
    /// Web search
    Search(SearchRequest),
    /// Image generation
    ImageGen(ImageGenRequest),
}

impl AiRequest {
    /// Text generation request
    pub fn text(prompt: impl Into<String>) -> Self {
        Self::Text(TextRequest::new(prompt))
    }

    /// Image analysis request
    pub fn vision(
        image_bytes: impl Into<Vec<u8>>,
        mime_type: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self::Vision(VisionRequest {
            image_bytes: image_bytes.into(),
            mime_type: mime_type.into(),
            prompt: prompt.into(),
        })
    }

    /// Audio analysis request
    pub fn audio(audio_bytes: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self::Audio(AudioRequest {
            audio_bytes: audio_bytes.into(),
            mime_type: mime_type.into(),
            prompt: None,
        })
    }

    /// Web search request
    pub fn search(query: impl Into<String>) -> Self {
        Self::Search(SearchRequest {
            query: query.into(),
        })
    }

    /// Image generation request
    pub fn image_gen(prompt: impl Into<String>) -> Self {
        Self::ImageGen(ImageGenRequest {
            prompt: prompt.into(),
            reference_image_bytes: None,
        })
    }

    /// Capability this payload belongs to
    pub fn capability(&self) -> Capability {
        match self {
            Self::Text(_) => Capability::Text,
            Self::Vision(_) => Capability::Vision,
            Self::Audio(_) => Capability::Audio,
            Self::Search(_) => Capability::Search,
            Self::ImageGen(_) => Capability::ImageGen,
        }
    }

    /// Main textual instruction carried by the request, if any
    pub fn prompt(&self) -> Option<&str> {
        match self {
            Self::Text(r) => Some(&r.prompt),
            Self::Vision(r) => Some(&r.prompt),
            Self::Audio(r) => r.prompt.as_deref(),
            Self::Search(r) => Some(&r.query),
            Self::ImageGen(r) => Some(&r.prompt),
        }
    }

    /// Check that the payload belongs to `capability` and is not obviously empty
    pub fn validate_for(&self, capability: Capability) -> RouteResult<()> {
        if self.capability() != capability {
            return Err(RouterError::invalid_request(format!(
                "payload is a '{}' request but '{}' was requested",
                self.capability(),
                capability
            )));
        }

        match self {
            Self::Text(r) => require_text("prompt", &r.prompt),
            Self::Vision(r) => {
                require_bytes("image_bytes", &r.image_bytes)?;
                require_text("mime_type", &r.mime_type)?;
                require_text("prompt", &r.prompt)
            }
            Self::Audio(r) => {
                require_bytes("audio_bytes", &r.audio_bytes)?;
                require_text("mime_type", &r.mime_type)
            }
            Self::Search(r) => require_text("query", &r.query),
            Self::ImageGen(r) => require_text("prompt", &r.prompt),
        }
    }

    /// Deterministic fingerprint of the normalized payload
    ///
    /// Normalization trims prompts, lowercases MIME types and hashes binary
    /// payloads, so two requests that only differ by surrounding whitespace
    /// share a fingerprint. Nothing about the serving provider is included.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.capability().as_str().as_bytes());

        match self {
            Self::Text(r) => {
                feed_str(&mut hasher, r.prompt.trim());
                feed_opt_u32(&mut hasher, r.max_tokens);
            }
            Self::Vision(r) => {
                feed_bytes(&mut hasher, &r.image_bytes);
                feed_str(&mut hasher, &normalize_mime(&r.mime_type));
                feed_str(&mut hasher, r.prompt.trim());
            }
            Self::Audio(r) => {
                feed_bytes(&mut hasher, &r.audio_bytes);
                feed_str(&mut hasher, &normalize_mime(&r.mime_type));
                feed_opt_str(&mut hasher, r.prompt.as_deref().map(str::trim));
            }
            Self::Search(r) => {
                feed_str(&mut hasher, r.query.trim());
            }
            Self::ImageGen(r) => {
                feed_str(&mut hasher, r.prompt.trim());
                match &r.reference_image_bytes {
                    Some(bytes) => {
                        hasher.update([1u8]);
                        feed_bytes(&mut hasher, bytes);
                    }
                    None => hasher.update([0u8]),
                }
            }
        }

        hex::encode(hasher.finalize())
    }
}

fn require_text(field: &str, value: &str) -> RouteResult<()> {
    if value.trim().is_empty() {
        return Err(RouterError::invalid_request(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_bytes(field: &str, value: &[u8]) -> RouteResult<()> {
    if value.is_empty() {
        return Err(RouterError::invalid_request(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn normalize_mime(mime_type: &str) -> String {
    mime_type.trim().to_ascii_lowercase()
}

// Length prefixes keep field boundaries unambiguous.
fn feed_str(hasher: &mut Sha256, value: &str) {
    feed_bytes(hasher, value.as_bytes());
}

fn feed_bytes(hasher: &mut Sha256, value: &[u8]) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value);
}

fn feed_opt_str(hasher: &mut Sha256, value: Option<&str>) {
    match value {
        Some(v) => {
            hasher.update([1u8]);
            feed_str(hasher, v);
        }
        None => hasher.update([0u8]),
    }
}

fn feed_opt_u32(hasher: &mut Sha256, value: Option<u32>) {
    match value {
        Some(v) => {
            hasher.update([1u8]);
            hasher.update(v.to_le_bytes());
        }
        None => hasher.update([0u8]),
    }
}
