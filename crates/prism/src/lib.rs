//! # Prism
//!
//! Capability-based routing across interchangeable AI providers.
//!
//! Callers ask for a capability (text, vision, audio, search, image
//! generation) instead of a vendor. The router walks a priority-ordered
//! fallback chain, skips providers whose circuit breaker is open, serves
//! repeated requests from a TTL cache and collapses identical in-flight
//! requests into one upstream call.
//!
//! ## Example
//!
//! ```no_run
//! use prism::{AiRequest, Capability, CapabilityRouter, ProviderConfig};
//! use prism::infrastructure::RouterBuilder;
//! use prism::infrastructure::config::ConfigBuilder;
//!
//! # async fn demo() -> prism::Result<()> {
//! let config = ConfigBuilder::new()
//!     .with_provider(ProviderConfig::new("primary").with_capability(Capability::Text))
//!     .build_validated()?;
//! let router = RouterBuilder::new(config).with_null_fallback().build()?;
//!
//! let response = router
//!     .route(Capability::Text, AiRequest::text("Hello"), router.default_options())
//!     .await;
//! # let _ = response;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Capabilities, requests, responses, error taxonomy and ports
//! - `infrastructure` - Router, breakers, cache policy, configuration, logging
//! - `providers` - Cache backends, the null adapter and vendor HTTP helpers

/// Domain layer - core types and port traits
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use prism_domain::*;
}

/// Infrastructure layer - routing, configuration and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use prism_infrastructure::*;
}

/// Provider implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use prism_providers::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the router entry points at the crate root
pub use infrastructure::{AiRouter, RouterBuilder, RouterStats};
