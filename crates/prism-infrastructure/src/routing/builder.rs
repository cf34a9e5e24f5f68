//! Router assembly
//!
//! Wires an [`AppConfig`] and one adapter per configured provider into an
//! [`AiRouter`].

use crate::cache::SharedResponseCache;
use crate::config::{AppConfig, ConfigLoader, validate_app_config};
use crate::routing::batcher::RequestBatcher;
use crate::routing::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig};
use crate::routing::coalescer::RequestCoalescer;
use crate::routing::health::HealthMonitor;
use crate::routing::metrics::RoutingMetrics;
use crate::routing::registry::CapabilityRegistry;
use crate::routing::router::{AiRouter, RouterInner};
use prism_domain::error::{Error, Result};
use prism_domain::ports::providers::ProviderAdapter;
use prism_providers::adapters::NullAdapter;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Builder for [`AiRouter`]
///
/// # Example
///
/// ```ignore
/// let config = ConfigLoader::new().load()?;
/// let router = RouterBuilder::new(config)
///     .with_adapter(Arc::new(GeminiAdapter::new(credentials)))
///     .with_adapter(Arc::new(OpenAiAdapter::new(credentials)))
///     .build()?;
/// ```
pub struct RouterBuilder {
    config: AppConfig,
    adapters: Vec<Arc<dyn ProviderAdapter>>,
    cache: Option<SharedResponseCache>,
    null_fallback: bool,
}

impl RouterBuilder {
    /// Start from a configuration
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            adapters: Vec::new(),
            cache: None,
            null_fallback: false,
        }
    }

    /// Start from whatever `loader` resolves
    pub fn from_loader(loader: &ConfigLoader) -> Result<Self> {
        Ok(Self::new(loader.load()?))
    }

    /// Register the adapter of one provider
    pub fn with_adapter(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
        self.adapters.push(adapter);
        self
    }

    /// Register several adapters
    pub fn with_adapters<I>(mut self, adapters: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn ProviderAdapter>>,
    {
        self.adapters.extend(adapters);
        self
    }

    /// Use `cache` instead of the one described by the configuration
    pub fn with_cache(mut self, cache: SharedResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Serve providers that have no registered adapter with a [`NullAdapter`]
    pub fn with_null_fallback(mut self) -> Self {
        self.null_fallback = true;
        self
    }

    /// Configuration the router will be built from
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Validate everything and assemble the router
    ///
    /// Must run inside a Tokio runtime: breakers and the health monitor are
    /// background tasks.
    pub fn build(self) -> Result<AiRouter> {
        tokio::runtime::Handle::try_current().map_err(|e| {
            Error::configuration_with_source("Router must be built inside a Tokio runtime", e)
        })?;
        validate_app_config(&self.config)?;

        let registry = CapabilityRegistry::new(self.config.providers.clone())?;

        let mut adapters: HashMap<String, Arc<dyn ProviderAdapter>> = HashMap::new();
        for adapter in self.adapters {
            let id = adapter.provider_id().to_string();
            if registry.get(&id).is_none() {
                return Err(Error::configuration(format!(
                    "Adapter '{id}' has no matching provider entry"
                )));
            }
            if adapters.insert(id.clone(), adapter).is_some() {
                return Err(Error::configuration(format!(
                    "Adapter '{id}' registered twice"
                )));
            }
        }

        let provider_ids = registry.provider_ids();
        for id in &provider_ids {
            if adapters.contains_key(id) {
                continue;
            }
            if !self.null_fallback {
                return Err(Error::configuration(format!(
                    "Provider '{id}' has no adapter"
                )));
            }
            adapters.insert(id.clone(), Arc::new(NullAdapter::new(id.clone())));
        }

        let metrics = RoutingMetrics::new();
        let breaker_config = CircuitBreakerConfig::from(&self.config.resilience);
        let breakers = provider_ids
            .iter()
            .map(|id| {
                (
                    id.clone(),
                    CircuitBreaker::with_metrics(id.clone(), breaker_config.clone(), metrics),
                )
            })
            .collect();

        let cache = self
            .cache
            .unwrap_or_else(|| SharedResponseCache::from_config(&self.config.cache));
        let batcher = self
            .config
            .batching
            .enabled
            .then(|| RequestBatcher::new(self.config.batching.clone()));
        let health = Arc::new(HealthMonitor::new(
            self.config.health.clone(),
            provider_ids.iter().cloned(),
        ));

        info!(
            providers = provider_ids.len(),
            cache = cache.provider_name(),
            batching = batcher.is_some(),
            "Router ready"
        );

        let router = AiRouter::from_inner(RouterInner {
            registry,
            adapters,
            breakers,
            cache,
            coalescer: RequestCoalescer::new(),
            batcher,
            health,
            metrics,
            default_timeout: self.config.routing.default_timeout(),
        });

        if self.config.health.enabled {
            router.start_health_monitor();
        }

        Ok(router)
    }
}
