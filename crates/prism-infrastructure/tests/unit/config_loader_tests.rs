//! Tests for layered configuration loading

#[cfg(test)]
mod tests {
    use figment::Jail;
    use prism_domain::{Capability, ProviderConfig};
    use prism_infrastructure::config::{
        AppConfig, ConfigBuilder, ConfigLoader, ResilienceConfig, validate_app_config,
    };
    use std::time::Duration;

    const PROVIDERS_TOML: &str = r#"
[resilience]
failure_threshold = 3
reset_timeout_ms = 30000

[cache]
ttl_ms = 1000

[[providers]]
id = "gemini"
capabilities = ["text", "vision"]
priority = 1
credential_ref = "GEMINI_API_KEY"

[[providers]]
id = "openai"
capabilities = ["text", "image_gen"]
priority = 2
"#;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::new()
                .with_config_path("absent.toml")
                .load()
                .unwrap();

            assert_eq!(config.resilience.failure_threshold, 5);
            assert_eq!(config.resilience.reset_timeout(), Duration::from_secs(60));
            assert_eq!(config.routing.default_timeout(), Duration::from_secs(30));
            assert!(config.cache.enabled);
            assert!(!config.batching.enabled);
            assert!(config.health.enabled);
            assert!(config.providers.is_empty());
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_is_merged_over_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file("prism.toml", PROVIDERS_TOML)?;
            let config = ConfigLoader::new()
                .with_config_path("prism.toml")
                .load()
                .unwrap();

            assert_eq!(config.resilience.failure_threshold, 3);
            assert_eq!(config.cache.ttl(), Duration::from_secs(1));
            assert_eq!(config.cache.max_entries, 200);
            assert_eq!(config.providers.len(), 2);

            let gemini = &config.providers[0];
            assert_eq!(gemini.id, "gemini");
            assert!(gemini.enabled);
            assert!(gemini.supports(Capability::Vision));
            assert_eq!(
                gemini.credential_ref.as_ref().map(|c| c.as_str()),
                Some("GEMINI_API_KEY")
            );
            assert_eq!(config.providers[1].priority, 2);
            assert!(config.providers[1].supports(Capability::ImageGen));
            Ok(())
        });
    }

    #[test]
    fn test_environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("prism.toml", PROVIDERS_TOML)?;
            jail.set_env("PRISM_RESILIENCE__FAILURE_THRESHOLD", "7");
            jail.set_env("PRISM_CACHE__ENABLED", "false");
            jail.set_env("PRISM_BATCHING__BATCH_SIZE", "9");

            let config = ConfigLoader::new()
                .with_config_path("prism.toml")
                .load()
                .unwrap();

            assert_eq!(config.resilience.failure_threshold, 7);
            assert!(!config.cache.enabled);
            assert_eq!(config.batching.batch_size, 9);
            assert_eq!(config.providers.len(), 2);
            Ok(())
        });
    }

    #[test]
    fn test_custom_env_prefix() {
        Jail::expect_with(|jail| {
            jail.set_env("ROUTER_ROUTING__DEFAULT_TIMEOUT_MS", "1500");
            let config = ConfigLoader::new()
                .with_config_path("absent.toml")
                .with_env_prefix("ROUTER")
                .load()
                .unwrap();
            assert_eq!(config.routing.default_timeout_ms, 1500);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "prism.toml",
                "[resilience]\nfailure_threshold = 0\n",
            )?;
            let result = ConfigLoader::new().with_config_path("prism.toml").load();
            assert!(result.is_err());
            Ok(())
        });
    }

    #[test]
    fn test_unknown_capability_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "prism.toml",
                "[[providers]]\nid = \"x\"\ncapabilities = [\"telepathy\"]\n",
            )?;
            let result = ConfigLoader::new().with_config_path("prism.toml").load();
            assert!(result.is_err());
            Ok(())
        });
    }

    #[test]
    fn test_duplicate_provider_ids_are_rejected() {
        let config = ConfigBuilder::new()
            .with_provider(ProviderConfig::new("a").with_capability(Capability::Text))
            .with_provider(ProviderConfig::new("a").with_capability(Capability::Search))
            .build();
        assert!(validate_app_config(&config).is_err());
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();
        assert!(validate_app_config(&config).is_err());
    }

    #[test]
    fn test_builder_validates() {
        let config = ConfigBuilder::new()
            .with_resilience(ResilienceConfig {
                failure_threshold: 2,
                reset_timeout_ms: 500,
            })
            .with_provider(ProviderConfig::new("gemini").with_capability(Capability::Text))
            .build_validated()
            .unwrap();
        assert_eq!(config.resilience.failure_threshold, 2);

        let broken = ConfigBuilder::new()
            .with_resilience(ResilienceConfig {
                failure_threshold: 0,
                reset_timeout_ms: 500,
            })
            .build_validated();
        assert!(broken.is_err());
    }

    #[test]
    fn test_saved_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let config = ConfigBuilder::new()
            .with_provider(
                ProviderConfig::new("gemini")
                    .with_capabilities([Capability::Text, Capability::Audio])
                    .with_priority(3),
            )
            .build();

        let loader = ConfigLoader::new().with_config_path(&path);
        loader.save_to_file(&config, &path).unwrap();
        assert_eq!(loader.config_path(), Some(path.as_path()));

        let loaded = loader.load().unwrap();
        assert_eq!(loaded.providers, config.providers);
    }
}
