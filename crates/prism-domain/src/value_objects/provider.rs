//! Provider configuration value objects

use crate::error::{Error, Result};
use crate::value_objects::Capability;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Opaque reference to a credential held elsewhere (env var name, secret id)
///
/// The router never resolves or logs the secret itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialRef(String);

impl CredentialRef {
    /// Wrap a credential reference
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The reference string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Startup configuration of one vendor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Unique provider identifier
    pub id: String,
    /// Whether the provider takes part in routing
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Capabilities the provider declares
    pub capabilities: BTreeSet<Capability>,
    /// Ordering key, lower is tried first
    #[serde(default)]
    pub priority: i32,
    /// Reference to the provider's credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_ref: Option<CredentialRef>,
}

fn default_enabled() -> bool {
    true
}

impl ProviderConfig {
    /// Enabled provider with no capabilities and priority zero
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            enabled: true,
            capabilities: BTreeSet::new(),
            priority: 0,
            credential_ref: None,
        }
    }

    /// Declare a capability
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    /// Declare several capabilities
    pub fn with_capabilities(mut self, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        self.capabilities.extend(capabilities);
        self
    }

    /// Set the ordering key
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Enable or disable the provider
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Attach a credential reference
    pub fn with_credential(mut self, reference: impl Into<String>) -> Self {
        self.credential_ref = Some(CredentialRef::new(reference));
        self
    }

    /// Whether the provider declares `capability`
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Validate a single provider entry
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::configuration("Provider id cannot be empty"));
        }
        if self.id.contains(char::is_whitespace) {
            return Err(Error::configuration(format!(
                "Provider id '{}' cannot contain whitespace",
                self.id
            )));
        }
        if self.capabilities.is_empty() {
            return Err(Error::configuration(format!(
                "Provider '{}' must declare at least one capability",
                self.id
            )));
        }
        Ok(())
    }
}
