//! Domain Value Objects
//!
//! Immutable value objects that describe routed work. Value objects are
//! defined by their attributes and can be compared for equality.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Capability`] | Category of AI operation a provider may serve |
//! | [`AiRequest`] | Capability-specific request payload |
//! | [`AiResponse`] | Provider answer, shared between coalesced callers |
//! | [`ResponseChunk`] | Incremental piece of a streamed answer |
//! | [`ProviderConfig`] | Startup configuration of one vendor |

/// Capability enumeration
pub mod capability;
/// Provider configuration value objects
pub mod provider;
/// Capability-specific request payloads
pub mod request;
/// Provider responses and stream chunks
pub mod response;

// Re-export commonly used value objects
pub use capability::Capability;
pub use provider::{CredentialRef, ProviderConfig};
pub use request::{
    AiRequest, AudioRequest, ImageGenRequest, SearchRequest, TextRequest, VisionRequest,
};
pub use response::{AiResponse, ResponseChunk, ResponseContent, SearchResult, UsageMetrics};
