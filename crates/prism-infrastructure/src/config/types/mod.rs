//! Configuration types module

pub mod app;
pub mod batching;
pub mod cache;
pub mod health;
pub mod logging;
pub mod resilience;
pub mod routing;

// Re-export main types
pub use app::AppConfig;
pub use batching::BatchingConfig;
pub use cache::CacheConfig;
pub use health::HealthConfig;
pub use logging::LoggingConfig;
pub use resilience::ResilienceConfig;
pub use routing::RoutingConfig;
