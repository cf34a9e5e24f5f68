//! Tests for the null response cache

#[cfg(test)]
mod tests {
    use prism_domain::{AiResponse, Capability, ResponseCacheProvider};
    use prism_providers::cache::NullCacheProvider;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_null_cache_never_hits() {
        let cache = NullCacheProvider::new();
        let value = Arc::new(AiResponse::text("openai", Capability::Text, "hi"));

        cache.put("k", value, Duration::from_secs(60)).await.unwrap();

        assert!(cache.get("k").await.unwrap().is_none());
        assert!(!cache.invalidate("k").await.unwrap());
        assert_eq!(cache.size().await.unwrap(), 0);
        assert_eq!(cache.stats().await.unwrap().entries, 0);
        assert_eq!(cache.provider_name(), "null");
    }
}
