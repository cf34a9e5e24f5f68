//! Unit tests for the Capability value object

#[cfg(test)]
mod tests {
    use prism_domain::Capability;
    use std::str::FromStr;

    #[test]
    fn test_capability_string_forms() {
        assert_eq!(Capability::Text.as_str(), "text");
        assert_eq!(Capability::ImageGen.as_str(), "image_gen");
        assert_eq!(Capability::Vision.to_string(), "vision");
    }

    #[test]
    fn test_capability_parse_is_lenient_about_case_and_dashes() {
        assert_eq!(Capability::from_str(" Vision ").unwrap(), Capability::Vision);
        assert_eq!(Capability::from_str("image-gen").unwrap(), Capability::ImageGen);
        assert_eq!(Capability::from_str("imagegen").unwrap(), Capability::ImageGen);
    }

    #[test]
    fn test_capability_parse_rejects_unknown() {
        let err = Capability::from_str("telepathy").unwrap_err();
        assert!(err.to_string().contains("telepathy"));
    }

    #[test]
    fn test_capability_serde_matches_as_str() {
        for capability in Capability::ALL {
            let json = serde_json::to_string(&capability).unwrap();
            assert_eq!(json, format!("\"{}\"", capability.as_str()));
            let back: Capability = serde_json::from_str(&json).unwrap();
            assert_eq!(back, capability);
        }
    }

    #[test]
    fn test_capability_unknown_fails_to_deserialize() {
        let result: Result<Capability, _> = serde_json::from_str("\"video\"");
        assert!(result.is_err());
    }
}
