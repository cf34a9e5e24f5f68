//! Tests for capability chains and runtime enablement

#[cfg(test)]
mod tests {
    use prism_domain::{Capability, ProviderConfig};
    use prism_infrastructure::config::HealthConfig;
    use prism_infrastructure::routing::{CapabilityRegistry, HealthMonitor};
    use std::time::Duration;

    fn provider(id: &str, priority: i32, capabilities: &[Capability]) -> ProviderConfig {
        ProviderConfig::new(id)
            .with_capabilities(capabilities.iter().copied())
            .with_priority(priority)
    }

    fn registry() -> CapabilityRegistry {
        CapabilityRegistry::new(vec![
            provider("openai", 2, &[Capability::Text, Capability::ImageGen]),
            provider("gemini", 1, &[Capability::Text, Capability::Vision]),
            provider("claude", 2, &[Capability::Text]),
            provider("perplexity", 0, &[Capability::Search]),
        ])
        .unwrap()
    }

    #[test]
    fn test_candidates_ordered_by_priority_then_declaration() {
        let registry = registry();
        assert_eq!(
            registry.candidates(Capability::Text),
            vec!["gemini", "openai", "claude"]
        );
        assert_eq!(registry.candidates(Capability::Search), vec!["perplexity"]);
        assert!(registry.candidates(Capability::Audio).is_empty());
    }

    #[test]
    fn test_disabled_provider_is_filtered_and_restored_in_place() {
        let registry = registry();
        registry.set_enabled("openai", false).unwrap();
        assert!(!registry.is_enabled("openai"));
        assert_eq!(registry.candidates(Capability::Text), vec!["gemini", "claude"]);
        assert!(registry.candidates(Capability::ImageGen).is_empty());

        registry.set_enabled("openai", true).unwrap();
        assert_eq!(
            registry.candidates(Capability::Text),
            vec!["gemini", "openai", "claude"]
        );
    }

    #[test]
    fn test_provider_disabled_in_config_starts_disabled() {
        let registry = CapabilityRegistry::new(vec![
            provider("a", 0, &[Capability::Text]).with_enabled(false),
            provider("b", 1, &[Capability::Text]),
        ])
        .unwrap();
        assert_eq!(registry.candidates(Capability::Text), vec!["b"]);
        assert_eq!(registry.provider_ids(), vec!["a", "b"]);
        assert_eq!(registry.enabled_provider_ids(), vec!["b"]);
    }

    #[test]
    fn test_unknown_provider_cannot_be_toggled() {
        let registry = registry();
        assert!(registry.set_enabled("mistral", false).is_err());
        assert!(!registry.is_enabled("mistral"));
        assert!(registry.get("mistral").is_none());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let result = CapabilityRegistry::new(vec![
            provider("a", 0, &[Capability::Text]),
            provider("a", 1, &[Capability::Vision]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_provider_without_capabilities_is_rejected() {
        assert!(CapabilityRegistry::new(vec![ProviderConfig::new("empty")]).is_err());
    }

    #[test]
    fn test_chains_list_only_served_capabilities() {
        let registry = registry();
        let chains = registry.chains();
        assert_eq!(chains.len(), 4);
        assert_eq!(chains[&Capability::Vision], vec!["gemini"]);
        assert!(!chains.contains_key(&Capability::Audio));
        assert_eq!(registry.len(), 4);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_ranked_candidates_move_unhealthy_last_and_slow_behind_healthy() {
        let registry = registry();
        let health = HealthMonitor::new(
            HealthConfig {
                latency_threshold_ms: 1_000,
                ..HealthConfig::default()
            },
            registry.provider_ids(),
        );

        health.record_probe("gemini", None);
        health.record_probe("openai", Some(Duration::from_secs(3)));
        health.record_probe("claude", Some(Duration::from_millis(50)));

        assert_eq!(
            registry.ranked_candidates(Capability::Text, &health),
            vec!["claude", "openai", "gemini"]
        );
    }

    #[test]
    fn test_ranked_candidates_keep_priority_without_probes() {
        let registry = registry();
        let health = HealthMonitor::new(HealthConfig::default(), registry.provider_ids());
        assert_eq!(
            registry.ranked_candidates(Capability::Text, &health),
            registry.candidates(Capability::Text)
        );
    }
}
