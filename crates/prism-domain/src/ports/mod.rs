//! Domain Port Interfaces
//!
//! Boundary contracts between the domain and the outer layers. The domain
//! defines the traits; providers and infrastructure implement them.
//!
//! ## Organization
//!
//! - **providers/** - vendor adapters and response cache backends
//! - **infrastructure/** - the routing service contract and its snapshots

/// Infrastructure service ports
pub mod infrastructure;
/// External service provider ports
pub mod providers;

pub use infrastructure::{CapabilityRouter, CircuitState, CircuitStatus, ProviderHealth, RouteOptions};
pub use providers::{AdapterResult, CacheStats, ProviderAdapter, ResponseCacheProvider, ResponseStream};
