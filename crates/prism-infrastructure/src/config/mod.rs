//! Configuration management
//!
//! Layered configuration: built-in defaults, then a TOML file, then
//! `PRISM_`-prefixed environment variables. Validation runs after merging so
//! a broken setup fails at startup instead of on the first request.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader, validate_app_config, validate_providers};
pub use types::{
    AppConfig, BatchingConfig, CacheConfig, HealthConfig, LoggingConfig, ResilienceConfig,
    RoutingConfig,
};
