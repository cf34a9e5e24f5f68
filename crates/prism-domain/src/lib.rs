//! # Prism Domain Layer
//!
//! Core types and contracts of the multi-provider AI router. Nothing in this
//! crate talks to a network or spawns tasks; it only describes *what* is routed
//! and *how* the pieces plug together.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Capabilities, typed requests/responses, provider configuration |
//! | [`ports`] | Traits implemented by adapters, caches and the router |
//! | [`error`] | Domain errors plus the router/adapter error taxonomy |
//! | [`constants`] | Default tunables shared by every layer |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{AdapterError, AttemptFailure, Error, Result, RouteResult, RouterError};
pub use ports::infrastructure::routing::{
    CapabilityRouter, CircuitState, CircuitStatus, ProviderHealth, RouteOptions,
};
pub use ports::providers::{AdapterResult, CacheStats, ProviderAdapter, ResponseCacheProvider, ResponseStream};
pub use value_objects::{
    AiRequest, AiResponse, AudioRequest, Capability, CredentialRef, ImageGenRequest,
    ProviderConfig, ResponseChunk, ResponseContent, SearchRequest, SearchResult, TextRequest,
    UsageMetrics, VisionRequest,
};
