//! Capability registry
//!
//! Maps each capability to its ordered candidate chain. The order is fixed at
//! construction: ascending priority, declaration order breaking ties. Runtime
//! enable/disable only filters the chain, so re-enabling a provider puts it
//! back exactly where it was.

use crate::config::validate_providers;
use crate::routing::health::HealthMonitor;
use prism_domain::error::{Error, Result};
use prism_domain::value_objects::{Capability, ProviderConfig};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

#[derive(Debug)]
struct ProviderSlot {
    config: ProviderConfig,
    enabled: AtomicBool,
}

/// Registry of providers and their capability chains
#[derive(Debug)]
pub struct CapabilityRegistry {
    providers: Vec<ProviderSlot>,
    index: HashMap<String, usize>,
    chains: HashMap<Capability, Vec<usize>>,
}

impl CapabilityRegistry {
    /// Build the registry from provider entries in declaration order
    pub fn new(providers: Vec<ProviderConfig>) -> Result<Self> {
        validate_providers(&providers)?;

        let mut chains: HashMap<Capability, Vec<usize>> = HashMap::new();
        for (position, provider) in providers.iter().enumerate() {
            for capability in &provider.capabilities {
                chains.entry(*capability).or_default().push(position);
            }
        }
        for chain in chains.values_mut() {
            // Stable sort keeps declaration order among equal priorities
            chain.sort_by_key(|&position| providers[position].priority);
        }

        let index = providers
            .iter()
            .enumerate()
            .map(|(position, provider)| (provider.id.clone(), position))
            .collect();
        let providers = providers
            .into_iter()
            .map(|config| ProviderSlot {
                enabled: AtomicBool::new(config.enabled),
                config,
            })
            .collect();

        Ok(Self {
            providers,
            index,
            chains,
        })
    }

    /// Enabled providers for `capability`, in priority order
    pub fn candidates(&self, capability: Capability) -> Vec<String> {
        self.chains
            .get(&capability)
            .map(|chain| {
                chain
                    .iter()
                    .map(|&position| &self.providers[position])
                    .filter(|slot| slot.enabled.load(Ordering::Acquire))
                    .map(|slot| slot.config.id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Enabled providers for `capability`, healthy ones first
    pub fn ranked_candidates(&self, capability: Capability, health: &HealthMonitor) -> Vec<String> {
        let mut candidates = self.candidates(capability);
        candidates.sort_by_key(|id| health.tier(id));
        candidates
    }

    /// Enable or disable a provider at runtime
    pub fn set_enabled(&self, provider_id: &str, enabled: bool) -> Result<()> {
        let slot = self
            .slot(provider_id)
            .ok_or_else(|| Error::not_found(format!("provider '{provider_id}'")))?;
        let previous = slot.enabled.swap(enabled, Ordering::AcqRel);
        if previous != enabled {
            info!(provider = provider_id, enabled, "Provider availability changed");
        }
        Ok(())
    }

    /// Whether a provider is currently enabled
    pub fn is_enabled(&self, provider_id: &str) -> bool {
        self.slot(provider_id)
            .is_some_and(|slot| slot.enabled.load(Ordering::Acquire))
    }

    /// Configuration of a provider
    pub fn get(&self, provider_id: &str) -> Option<&ProviderConfig> {
        self.slot(provider_id).map(|slot| &slot.config)
    }

    /// Every provider id, in declaration order
    pub fn provider_ids(&self) -> Vec<String> {
        self.providers
            .iter()
            .map(|slot| slot.config.id.clone())
            .collect()
    }

    /// Enabled provider ids, in declaration order
    pub fn enabled_provider_ids(&self) -> Vec<String> {
        self.providers
            .iter()
            .filter(|slot| slot.enabled.load(Ordering::Acquire))
            .map(|slot| slot.config.id.clone())
            .collect()
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider is registered
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Current chain of every capability that has at least one enabled provider
    pub fn chains(&self) -> BTreeMap<Capability, Vec<String>> {
        Capability::ALL
            .into_iter()
            .map(|capability| (capability, self.candidates(capability)))
            .filter(|(_, chain)| !chain.is_empty())
            .collect()
    }

    fn slot(&self, provider_id: &str) -> Option<&ProviderSlot> {
        self.index
            .get(provider_id)
            .map(|&position| &self.providers[position])
    }
}
