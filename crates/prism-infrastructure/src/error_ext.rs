//! Error extension utilities
//!
//! Attach context to third-party failures (figment, toml, std I/O) while
//! converting them into the domain [`Error`], so configuration and file
//! problems surface with the operation that caused them.

use prism_domain::error::{Error, Result};
use std::fmt;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Extension trait for adding context to errors
///
/// ```ignore
/// use prism_infrastructure::ErrorContext;
///
/// let config: AppConfig = figment.extract().config_context("Invalid configuration")?;
/// std::fs::write(&path, body).io_context("Failed to write config file")?;
/// ```
pub trait ErrorContext<T> {
    /// Wrap the failure as [`Error::Infrastructure`]
    fn context<C: fmt::Display>(self, context: C) -> Result<T>;

    /// Wrap the failure as [`Error::Io`]
    fn io_context<C: fmt::Display>(self, context: C) -> Result<T>;

    /// Wrap the failure as [`Error::Configuration`]
    fn config_context<C: fmt::Display>(self, context: C) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C: fmt::Display>(self, context: C) -> Result<T> {
        self.map_err(|err| {
            let (message, source) = describe(&context, err);
            Error::Infrastructure { message, source }
        })
    }

    fn io_context<C: fmt::Display>(self, context: C) -> Result<T> {
        self.map_err(|err| {
            let (message, source) = describe(&context, err);
            Error::Io { message, source }
        })
    }

    fn config_context<C: fmt::Display>(self, context: C) -> Result<T> {
        self.map_err(|err| {
            let (message, source) = describe(&context, err);
            Error::Configuration { message, source }
        })
    }
}

fn describe<C, E>(context: &C, err: E) -> (String, Option<BoxedSource>)
where
    C: fmt::Display,
    E: std::error::Error + Send + Sync + 'static,
{
    (format!("{context}: {err}"), Some(Box::new(err)))
}
