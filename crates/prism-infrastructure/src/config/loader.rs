//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables and
//! default values, using Figment to merge the layers.

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use prism_domain::error::{Error, Result};
use prism_domain::value_objects::ProviderConfig;
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix (e.g., `PRISM_RESILIENCE__FAILURE_THRESHOLD`)
    pub fn load(&self) -> Result<AppConfig> {
        let app_config: AppConfig = self
            .figment()
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Reload configuration from the same sources
    pub fn reload(&self) -> Result<AppConfig> {
        self.load()
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    fn figment(&self) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            let exists = config_path.exists();
            if exists {
                figment = figment.merge(Toml::file(config_path));
            }
            log_config_loaded(config_path, exists);
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Double underscore separates nested keys so field names keep their
        // own underscores (PRISM_CACHE__MAX_ENTRIES -> cache.max_entries)
        figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        )
    }

    /// Find default configuration file paths to try
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
            dirs::config_dir()
                .map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME))
                .unwrap_or_default(),
            dirs::home_dir()
                .map(|d| {
                    d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                        .join(DEFAULT_CONFIG_FILENAME)
                })
                .unwrap_or_default(),
        ];

        candidates.into_iter().find(|path| path.is_file())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Performs validation of all configuration sections.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_logging_config(config)?;
    validate_routing_config(config)?;
    validate_resilience_config(config)?;
    validate_cache_config(config)?;
    validate_batching_config(config)?;
    validate_health_config(config)?;
    validate_providers(&config.providers)?;
    Ok(())
}

fn validate_logging_config(config: &AppConfig) -> Result<()> {
    crate::logging::parse_log_level(&config.logging.level).map(|_| ())
}

fn validate_routing_config(config: &AppConfig) -> Result<()> {
    if config.routing.default_timeout_ms == 0 {
        return Err(Error::configuration("Default route timeout cannot be 0"));
    }
    Ok(())
}

fn validate_resilience_config(config: &AppConfig) -> Result<()> {
    if config.resilience.failure_threshold == 0 {
        return Err(Error::configuration(
            "Circuit breaker failure threshold cannot be 0",
        ));
    }
    if config.resilience.reset_timeout_ms == 0 {
        return Err(Error::configuration(
            "Circuit breaker reset timeout cannot be 0",
        ));
    }
    Ok(())
}

fn validate_cache_config(config: &AppConfig) -> Result<()> {
    if config.cache.enabled {
        if config.cache.ttl_ms == 0 {
            return Err(Error::configuration(
                "Cache TTL cannot be 0 when cache is enabled",
            ));
        }
        if config.cache.max_entries == 0 {
            return Err(Error::configuration(
                "Cache max entries cannot be 0 when cache is enabled",
            ));
        }
    }
    Ok(())
}

fn validate_batching_config(config: &AppConfig) -> Result<()> {
    if config.batching.enabled {
        if config.batching.batch_size == 0 {
            return Err(Error::configuration(
                "Batch size cannot be 0 when batching is enabled",
            ));
        }
        if config.batching.batch_delay_ms == 0 {
            return Err(Error::configuration(
                "Batch delay cannot be 0 when batching is enabled",
            ));
        }
    }
    Ok(())
}

fn validate_health_config(config: &AppConfig) -> Result<()> {
    if config.health.enabled {
        if config.health.interval_secs == 0 {
            return Err(Error::configuration(
                "Health check interval cannot be 0 when health checks are enabled",
            ));
        }
        if config.health.probe_timeout_ms == 0 {
            return Err(Error::configuration(
                "Health probe timeout cannot be 0 when health checks are enabled",
            ));
        }
    }
    Ok(())
}

/// Validate the provider list: valid entries, unique ids
pub fn validate_providers(providers: &[ProviderConfig]) -> Result<()> {
    let mut seen = HashSet::new();
    for provider in providers {
        provider.validate()?;
        if !seen.insert(provider.id.as_str()) {
            return Err(Error::configuration(format!(
                "Duplicate provider id '{}'",
                provider.id
            )));
        }
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: crate::config::LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set routing configuration
    pub fn with_routing(mut self, routing: crate::config::RoutingConfig) -> Self {
        self.config.routing = routing;
        self
    }

    /// Set resilience configuration
    pub fn with_resilience(mut self, resilience: crate::config::ResilienceConfig) -> Self {
        self.config.resilience = resilience;
        self
    }

    /// Set cache configuration
    pub fn with_cache(mut self, cache: crate::config::CacheConfig) -> Self {
        self.config.cache = cache;
        self
    }

    /// Set batching configuration
    pub fn with_batching(mut self, batching: crate::config::BatchingConfig) -> Self {
        self.config.batching = batching;
        self
    }

    /// Set health monitor configuration
    pub fn with_health(mut self, health: crate::config::HealthConfig) -> Self {
        self.config.health = health;
        self
    }

    /// Append a provider
    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.config.providers.push(provider);
        self
    }

    /// Build the configuration without validating it
    pub fn build(self) -> AppConfig {
        self.config
    }

    /// Build and validate the configuration
    pub fn build_validated(self) -> Result<AppConfig> {
        validate_app_config(&self.config)?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
