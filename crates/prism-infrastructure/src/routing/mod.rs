//! Multi-Provider Routing Infrastructure
//!
//! Routes capability-typed requests across vendor adapters with fallback,
//! per-provider circuit breakers, response caching, request coalescing,
//! optional batching and probe-driven health ordering.
//!
//! ## Components
//!
//! - [`AiRouter`] - Capability router, entry point for callers
//! - [`RouterBuilder`] - Assembles a router from configuration and adapters
//! - [`CapabilityRegistry`] - Capability to candidate chain mapping
//! - [`CircuitBreaker`] - Per-provider breaker actor
//! - [`RequestCoalescer`] - In-flight deduplication
//! - [`RequestBatcher`] - Groups requests into vendor batch calls
//! - [`HealthMonitor`] - Periodic probe results
//! - [`RoutingMetrics`] - `metrics` crate facade

mod batcher;
mod builder;
mod circuit_breaker;
mod coalescer;
mod health;
mod metrics;
mod registry;
mod router;

pub use batcher::{BatchOutcome, RequestBatcher};
pub use builder::RouterBuilder;
pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerMetrics};
pub use coalescer::{RequestCoalescer, Subscription};
pub use health::{HealthMonitor, HealthTier};
pub use metrics::RoutingMetrics;
pub use registry::CapabilityRegistry;
pub use router::{AiRouter, RouterStats};
