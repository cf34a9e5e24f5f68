//! Infrastructure utilities
//!
//! Note: HttpResponseUtils is in prism_providers::utils.

mod timing;

pub use timing::TimedOperation;
