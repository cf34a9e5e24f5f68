//! # Prism - Provider Implementations
//!
//! Concrete implementations of the ports defined in `prism-domain`. Vendor
//! adapters for real AI services live outside this crate; what ships here is
//! what every deployment needs regardless of vendor.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Response cache | `ResponseCacheProvider` | Moka, Null |
//! | Adapter | `ProviderAdapter` | Null |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! prism-providers = { version = "0.1", default-features = false }
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use prism_providers::adapters::NullAdapter;
//! use prism_providers::cache::MokaResponseCache;
//! use prism_providers::utils::HttpResponseUtils;
//! ```

// Re-export prism-domain types commonly used with providers
pub use prism_domain::error::{AdapterError, Error, Result};
pub use prism_domain::ports::providers::{
    AdapterResult, ProviderAdapter, ResponseCacheProvider, ResponseStream,
};

/// Provider-specific constants
pub mod constants;

/// Shared utilities for vendor adapter implementations
pub mod utils;

/// Response cache implementations
///
/// Implements `ResponseCacheProvider` for caching backends.
pub mod cache;

/// Adapter implementations
///
/// Implements `ProviderAdapter` for adapters that need no vendor.
pub mod adapters;
