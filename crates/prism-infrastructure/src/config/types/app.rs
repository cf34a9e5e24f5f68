//! Main application configuration

use super::{
    BatchingConfig, CacheConfig, HealthConfig, LoggingConfig, ResilienceConfig, RoutingConfig,
};
use prism_domain::value_objects::ProviderConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
///
/// ```toml
/// [resilience]
/// failure_threshold = 5
/// reset_timeout_ms = 60000
///
/// [[providers]]
/// id = "gemini"
/// capabilities = ["text", "vision"]
/// priority = 1
/// credential_ref = "GEMINI_API_KEY"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Routing configuration
    pub routing: RoutingConfig,
    /// Circuit breaker configuration
    pub resilience: ResilienceConfig,
    /// Response cache configuration
    pub cache: CacheConfig,
    /// Request batching configuration
    pub batching: BatchingConfig,
    /// Health monitor configuration
    pub health: HealthConfig,
    /// Configured providers, in declaration order
    pub providers: Vec<ProviderConfig>,
}
