//! Tests for the null adapter

#[cfg(test)]
mod tests {
    use prism_domain::{AiRequest, Capability, ProviderAdapter, ResponseContent};
    use prism_providers::adapters::NullAdapter;
    use std::time::Duration;
    use tokio::time::Instant;

    fn deadline() -> Instant {
        Instant::now() + Duration::from_secs(5)
    }

    #[tokio::test]
    async fn test_text_echoes_prompt() {
        let adapter = NullAdapter::new("dry-run");
        let response = adapter
            .call(Capability::Text, &AiRequest::text("  hello  "), deadline())
            .await
            .unwrap();

        assert_eq!(response.provider_id, "dry-run");
        assert_eq!(response.content.as_text(), Some("[dry-run] hello"));
        assert_eq!(response.model.as_deref(), Some("null-echo"));
    }

    #[tokio::test]
    async fn test_each_capability_has_a_payload() {
        let adapter = NullAdapter::new("n");

        let image = adapter
            .call(Capability::ImageGen, &AiRequest::image_gen("cat"), deadline())
            .await
            .unwrap();
        assert!(matches!(image.content, ResponseContent::Image { .. }));

        let search = adapter
            .call(Capability::Search, &AiRequest::search("rust"), deadline())
            .await
            .unwrap();
        match search.content {
            ResponseContent::SearchResults { results } => assert_eq!(results.len(), 1),
            other => panic!("Expected search results, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mismatched_payload_is_unsupported() {
        let adapter = NullAdapter::new("n");
        let err = adapter
            .call(Capability::Vision, &AiRequest::text("hi"), deadline())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "unsupported");
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_past_deadline_times_out() {
        let adapter = NullAdapter::new("slow").with_latency(Duration::from_secs(10));
        let err = adapter
            .call(
                Capability::Text,
                &AiRequest::text("hi"),
                Instant::now() + Duration::from_secs(1),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "timeout");
    }

    #[tokio::test(start_paused = true)]
    async fn test_ping_honours_latency() {
        let adapter = NullAdapter::new("slow").with_latency(Duration::from_millis(200));
        assert!(adapter.supports_ping());

        let started = Instant::now();
        adapter.ping(deadline()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_batch_answers_each_member() {
        let adapter = NullAdapter::new("batch");
        let requests = vec![AiRequest::text("one"), AiRequest::search("two")];

        let results = adapter
            .call_batch(Capability::Text, &requests, deadline())
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].as_ref().unwrap().content.as_text(),
            Some("[batch] one")
        );
        assert!(results[1].is_err());
    }
}
