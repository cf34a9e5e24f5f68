//! Provider Utilities
//!
//! Shared utilities used by vendor adapter implementations.

mod http_response;

pub use http_response::HttpResponseUtils;
