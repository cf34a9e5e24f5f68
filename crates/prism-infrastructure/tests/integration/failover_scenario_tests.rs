//! Quota exhaustion on the primary provider, failover, and recovery

#[cfg(test)]
mod tests {
    use crate::scripted::{ScriptedAdapter, Step};
    use prism_domain::{
        AdapterError, AiRequest, Capability, CapabilityRouter, CircuitStatus, ProviderAdapter,
        ProviderConfig, RouteOptions,
    };
    use prism_infrastructure::config::{ConfigBuilder, HealthConfig, ResilienceConfig};
    use prism_infrastructure::RouterBuilder;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_quota_exhaustion_fails_over_and_recovers() {
        // Five quota refusals, then the quota resets and gemini answers again
        let quota = || Step::Fail(AdapterError::quota_exceeded("429 daily quota"));
        let gemini = Arc::new(
            ScriptedAdapter::new("gemini")
                .then(quota())
                .then(quota())
                .then(quota())
                .then(quota())
                .then(quota()),
        );
        let openai = Arc::new(ScriptedAdapter::new("openai"));

        let config = ConfigBuilder::new()
            .with_resilience(ResilienceConfig {
                failure_threshold: 5,
                reset_timeout_ms: 60_000,
            })
            .with_health(HealthConfig {
                enabled: false,
                ..HealthConfig::default()
            })
            .with_provider(
                ProviderConfig::new("gemini")
                    .with_capabilities([Capability::Text, Capability::Vision])
                    .with_priority(1),
            )
            .with_provider(
                ProviderConfig::new("openai")
                    .with_capabilities([Capability::Text, Capability::Vision, Capability::ImageGen])
                    .with_priority(2),
            )
            .build();

        let router = RouterBuilder::new(config)
            .with_adapter(Arc::clone(&gemini) as Arc<dyn ProviderAdapter>)
            .with_adapter(Arc::clone(&openai) as Arc<dyn ProviderAdapter>)
            .build()
            .unwrap();
        let options = || RouteOptions::new().with_cache(false);
        let photo = |prompt: &str| AiRequest::vision(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg", prompt);

        // Each of the first five routes tries gemini, fails, and lands on openai
        for i in 0..5 {
            let response = router
                .route(Capability::Vision, photo(&format!("q{i}")), options())
                .await
                .unwrap();
            assert_eq!(response.provider_id, "openai");
        }
        assert_eq!(gemini.calls(), 5);

        let states = router.circuit_states().await;
        assert_eq!(states[0].provider_id, "gemini");
        assert_eq!(states[0].state, CircuitStatus::Open);
        assert!(states[0].last_failure_at.is_some());

        // Open circuit: gemini is skipped without being called
        let response = router
            .route(Capability::Vision, photo("q5"), options())
            .await
            .unwrap();
        assert_eq!(response.provider_id, "openai");
        assert_eq!(gemini.calls(), 5);
        assert_eq!(openai.calls(), 6);

        // After the cool-down one trial goes back to gemini
        tokio::time::advance(Duration::from_secs(60)).await;

        let response = router
            .route(Capability::Vision, photo("q6"), options())
            .await
            .unwrap();
        assert_eq!(response.provider_id, "gemini");
        assert_eq!(response.content.as_text(), Some("gemini:q6"));
        assert_eq!(gemini.calls(), 6);

        let states = router.circuit_states().await;
        assert_eq!(states[0].state, CircuitStatus::Closed);
        assert_eq!(states[0].consecutive_failures, 0);

        let metrics = router.breaker_metrics("gemini").await.unwrap();
        assert_eq!(metrics.circuit_opened_count, 1);
        assert_eq!(metrics.circuit_closed_count, 1);
        assert_eq!(metrics.rejected_requests, 1);
    }

    #[tokio::test]
    async fn test_capability_served_by_single_provider() {
        let gemini = Arc::new(ScriptedAdapter::new("gemini"));
        let openai = Arc::new(ScriptedAdapter::new("openai"));
        let config = ConfigBuilder::new()
            .with_health(HealthConfig {
                enabled: false,
                ..HealthConfig::default()
            })
            .with_provider(ProviderConfig::new("gemini").with_capability(Capability::Vision))
            .with_provider(ProviderConfig::new("openai").with_capability(Capability::ImageGen))
            .build();
        let router = RouterBuilder::new(config)
            .with_adapters([
                Arc::clone(&gemini) as Arc<dyn ProviderAdapter>,
                Arc::clone(&openai) as Arc<dyn ProviderAdapter>,
            ])
            .build()
            .unwrap();

        let response = router
            .route(
                Capability::ImageGen,
                AiRequest::image_gen("a lighthouse at dusk"),
                RouteOptions::new(),
            )
            .await
            .unwrap();
        assert_eq!(response.provider_id, "openai");
        assert_eq!(gemini.calls(), 0);
    }
}
