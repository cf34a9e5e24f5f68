//! Unit tests for routing port value types

#[cfg(test)]
mod tests {
    use prism_domain::{CircuitStatus, ProviderHealth, RouteOptions};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    #[test]
    fn test_route_options_defaults() {
        let options = RouteOptions::default();
        assert_eq!(options.timeout, Duration::from_millis(30_000));
        assert!(options.allow_cache);
        assert!(options.cancellation.is_none());
    }

    #[test]
    fn test_route_options_builders() {
        let token = CancellationToken::new();
        let options = RouteOptions::new()
            .with_timeout(Duration::from_secs(2))
            .with_cache(false)
            .with_cancellation(token.clone());

        assert_eq!(options.timeout, Duration::from_secs(2));
        assert!(!options.allow_cache);
        token.cancel();
        assert!(options.cancellation.unwrap().is_cancelled());
    }

    #[test]
    fn test_unknown_health_counts_as_healthy() {
        let health = ProviderHealth::unknown("gemini");
        assert!(health.healthy);
        assert_eq!(health.total_probes, 0);
        assert!(!health.is_slow(Duration::from_millis(1)));
    }

    #[test]
    fn test_health_slowness_uses_average_latency() {
        let mut health = ProviderHealth::unknown("openai");
        health.average_latency_ms = Some(250.0);
        assert!(health.is_slow(Duration::from_millis(200)));
        assert!(!health.is_slow(Duration::from_millis(300)));
    }

    #[test]
    fn test_circuit_status_labels() {
        assert_eq!(CircuitStatus::default(), CircuitStatus::Closed);
        assert_eq!(CircuitStatus::HalfOpen.to_string(), "half_open");
        assert_eq!(
            serde_json::to_string(&CircuitStatus::Open).unwrap(),
            "\"open\""
        );
    }
}
