//! Unit tests for request payloads, validation and fingerprints

#[cfg(test)]
mod tests {
    use prism_domain::{AiRequest, Capability, RouterError, TextRequest, VisionRequest};

    #[test]
    fn test_request_reports_its_capability() {
        assert_eq!(AiRequest::text("hi").capability(), Capability::Text);
        assert_eq!(
            AiRequest::vision(vec![1, 2], "image/png", "describe").capability(),
            Capability::Vision
        );
        assert_eq!(AiRequest::audio(vec![1], "audio/wav").capability(), Capability::Audio);
        assert_eq!(AiRequest::search("rust").capability(), Capability::Search);
        assert_eq!(AiRequest::image_gen("a cat").capability(), Capability::ImageGen);
    }

    #[test]
    fn test_validate_rejects_capability_mismatch() {
        let err = AiRequest::text("hi")
            .validate_for(Capability::Vision)
            .unwrap_err();
        assert!(matches!(err, RouterError::InvalidRequest { .. }));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        assert!(AiRequest::text("   ").validate_for(Capability::Text).is_err());
        assert!(AiRequest::search("").validate_for(Capability::Search).is_err());
        assert!(
            AiRequest::vision(Vec::<u8>::new(), "image/png", "describe")
                .validate_for(Capability::Vision)
                .is_err()
        );
        assert!(
            AiRequest::audio(vec![1, 2, 3], "")
                .validate_for(Capability::Audio)
                .is_err()
        );
    }

    #[test]
    fn test_validate_accepts_well_formed_request() {
        assert!(
            AiRequest::vision(vec![0xFF, 0xD8], "image/jpeg", "what is this?")
                .validate_for(Capability::Vision)
                .is_ok()
        );
        assert!(AiRequest::audio(vec![1], "audio/wav").validate_for(Capability::Audio).is_ok());
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let a = AiRequest::text("hello world");
        let b = AiRequest::text("hello world");
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn test_fingerprint_ignores_surrounding_whitespace_and_mime_case() {
        let a = AiRequest::vision(vec![1, 2, 3], "IMAGE/PNG", "  describe ");
        let b = AiRequest::vision(vec![1, 2, 3], "image/png", "describe");
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_fingerprint_distinguishes_payloads() {
        let a = AiRequest::vision(vec![1, 2, 3], "image/png", "describe");
        let b = AiRequest::vision(vec![1, 2, 4], "image/png", "describe");
        assert_ne!(a.fingerprint(), b.fingerprint());

        let limited = AiRequest::Text(TextRequest::new("hi").with_max_tokens(10));
        assert_ne!(limited.fingerprint(), AiRequest::text("hi").fingerprint());
    }

    #[test]
    fn test_fingerprint_distinguishes_capabilities_with_same_text() {
        assert_ne!(
            AiRequest::text("rust").fingerprint(),
            AiRequest::search("rust").fingerprint()
        );
    }

    #[test]
    fn test_field_boundaries_do_not_collide() {
        let a = AiRequest::Vision(VisionRequest {
            image_bytes: b"ab".to_vec(),
            mime_type: "c".to_string(),
            prompt: "d".to_string(),
        });
        let b = AiRequest::Vision(VisionRequest {
            image_bytes: b"a".to_vec(),
            mime_type: "bc".to_string(),
            prompt: "d".to_string(),
        });
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_request_serde_is_tagged_by_capability() {
        let json = serde_json::to_value(AiRequest::search("weather")).unwrap();
        assert_eq!(json["capability"], "search");
        assert_eq!(json["query"], "weather");
    }
}
