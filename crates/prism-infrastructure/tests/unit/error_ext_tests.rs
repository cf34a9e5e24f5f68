//! Tests for error context helpers

#[cfg(test)]
mod tests {
    use prism_domain::Error;
    use prism_infrastructure::ErrorContext;
    use std::io;

    fn failing() -> Result<(), io::Error> {
        Err(io::Error::new(io::ErrorKind::NotFound, "missing"))
    }

    #[test]
    fn test_context_wraps_as_infrastructure_error() {
        let err = failing().context("Loading adapters").unwrap_err();
        assert!(matches!(err, Error::Infrastructure { .. }));
        assert!(err.to_string().contains("Loading adapters: missing"));
    }

    #[test]
    fn test_io_and_config_context_pick_matching_variants() {
        assert!(matches!(
            failing().io_context("Reading file").unwrap_err(),
            Error::Io { .. }
        ));
        assert!(matches!(
            failing().config_context("Parsing config").unwrap_err(),
            Error::Configuration { .. }
        ));
    }
}
