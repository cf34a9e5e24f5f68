//! Infrastructure Ports

/// Capability routing port
pub mod routing;

pub use routing::{CapabilityRouter, CircuitState, CircuitStatus, ProviderHealth, RouteOptions};
