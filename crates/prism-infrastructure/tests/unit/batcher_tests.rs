//! Tests for request batching

#[cfg(test)]
mod tests {
    use crate::scripted::ScriptedAdapter;
    use prism_domain::{AdapterError, AiRequest, Capability, ProviderAdapter};
    use prism_infrastructure::config::BatchingConfig;
    use prism_infrastructure::routing::{CircuitBreaker, CircuitBreakerConfig, RequestBatcher};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    fn batcher(size: usize, delay_ms: u64) -> RequestBatcher {
        RequestBatcher::new(BatchingConfig {
            enabled: true,
            batch_delay_ms: delay_ms,
            batch_size: size,
        })
    }

    fn breaker() -> CircuitBreaker {
        CircuitBreaker::new("openai", CircuitBreakerConfig::new(5, Duration::from_secs(60)))
    }

    fn deadline() -> Instant {
        Instant::now() + Duration::from_secs(30)
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_batch_flushes_immediately_and_demultiplexes() {
        let adapter = Arc::new(ScriptedAdapter::new("openai").with_batch());
        let dyn_adapter: Arc<dyn ProviderAdapter> = adapter.clone();
        let breaker = breaker();
        let batcher = batcher(2, 60_000);

        let started = Instant::now();
        let (first, second) = tokio::join!(
            batcher.submit(dyn_adapter.clone(), &breaker, Capability::Text, AiRequest::text("one"), deadline()),
            batcher.submit(dyn_adapter.clone(), &breaker, Capability::Text, AiRequest::text("two"), deadline()),
        );

        assert_eq!(first.result.unwrap().content.as_text(), Some("openai:one"));
        assert_eq!(second.result.unwrap().content.as_text(), Some("openai:two"));
        assert_eq!(adapter.batch_calls(), 1);
        assert_eq!(adapter.batch_sizes(), vec![2]);
        assert!(started.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_batch_flushes_after_delay() {
        let adapter = Arc::new(ScriptedAdapter::new("openai").with_batch());
        let dyn_adapter: Arc<dyn ProviderAdapter> = adapter.clone();
        let breaker = breaker();
        let batcher = batcher(5, 1_000);

        let started = Instant::now();
        let response = batcher
            .submit(dyn_adapter, &breaker, Capability::Text, AiRequest::text("alone"), deadline())
            .await;

        assert!(response.counts_for_breaker);
        assert_eq!(response.result.unwrap().content.as_text(), Some("openai:alone"));
        assert!(started.elapsed() >= Duration::from_secs(1));
        assert_eq!(adapter.batch_sizes(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_whole_batch_failure_reaches_every_member() {
        let adapter = Arc::new(
            ScriptedAdapter::new("openai").with_failing_batch(AdapterError::quota_exceeded("429")),
        );
        let dyn_adapter: Arc<dyn ProviderAdapter> = adapter.clone();
        let breaker = breaker();
        let batcher = batcher(2, 1_000);

        let (first, second) = tokio::join!(
            batcher.submit(dyn_adapter.clone(), &breaker, Capability::Text, AiRequest::text("a"), deadline()),
            batcher.submit(dyn_adapter.clone(), &breaker, Capability::Text, AiRequest::text("b"), deadline()),
        );

        assert_eq!(first.result.unwrap_err(), AdapterError::quota_exceeded("429"));
        assert_eq!(second.result.unwrap_err(), AdapterError::quota_exceeded("429"));
        assert_eq!(adapter.batch_calls(), 1);

        // One vendor call failed, so the breaker sees one failure
        assert!(!first.counts_for_breaker);
        assert!(!second.counts_for_breaker);
        assert_eq!(breaker.state().await.consecutive_failures, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_capabilities_are_queued_separately() {
        let adapter = Arc::new(ScriptedAdapter::new("openai").with_batch());
        let dyn_adapter: Arc<dyn ProviderAdapter> = adapter.clone();
        let breaker = breaker();
        let batcher = batcher(2, 500);

        let (text, search) = tokio::join!(
            batcher.submit(dyn_adapter.clone(), &breaker, Capability::Text, AiRequest::text("t"), deadline()),
            batcher.submit(dyn_adapter.clone(), &breaker, Capability::Search, AiRequest::search("s"), deadline()),
        );

        assert!(text.result.is_ok());
        assert!(search.result.is_ok());
        assert_eq!(adapter.batch_sizes(), vec![1, 1]);
    }
}
