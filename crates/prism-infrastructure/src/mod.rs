//! # Infrastructure Layer
//!
//! Runtime machinery of the router: configuration, logging, response caching
//! and the routing engine itself. Concrete cache backends and the null
//! adapter come from prism-providers; vendor adapters are supplied by the
//! embedding application.
//!
//! ## Module Categories
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered TOML + environment configuration with validation |
//! | [`constants`] | Centralized infrastructure constants and metric names |
//!
//! ### Data & Storage
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Response cache keys, namespaces and TTL policy |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//!
//! ### Routing
//! | Module | Description |
//! |--------|-------------|
//! | [`routing`] | Fallback chains, circuit breakers, coalescing, batching, health |

pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;
pub mod routing;
pub mod utils;

// Re-export commonly used types
pub use error_ext::ErrorContext;
pub use routing::{AiRouter, RouterBuilder, RouterStats};
pub use utils::TimedOperation;
