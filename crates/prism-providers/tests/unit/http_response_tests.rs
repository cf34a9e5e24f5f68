//! Tests for HTTP status mapping helpers

#[cfg(test)]
mod tests {
    use prism_domain::AdapterError;
    use prism_providers::utils::HttpResponseUtils;

    #[test]
    fn test_status_codes_map_to_adapter_kinds() {
        let kind = |code| HttpResponseUtils::from_status("openai", code, "").kind();

        assert_eq!(kind(401), "authentication");
        assert_eq!(kind(403), "authentication");
        assert_eq!(kind(429), "quota_exceeded");
        assert_eq!(kind(408), "timeout");
        assert_eq!(kind(504), "timeout");
        assert_eq!(kind(500), "network");
        assert_eq!(kind(503), "network");
        assert_eq!(kind(400), "vendor");
        assert_eq!(kind(404), "vendor");
    }

    #[test]
    fn test_vendor_message_reads_common_error_shapes() {
        assert_eq!(
            HttpResponseUtils::vendor_message(r#"{"error": {"message": "bad key"}}"#),
            "bad key"
        );
        assert_eq!(
            HttpResponseUtils::vendor_message(r#"{"error": "slow down"}"#),
            "slow down"
        );
        assert_eq!(
            HttpResponseUtils::vendor_message(r#"{"message": "oops"}"#),
            "oops"
        );
        assert_eq!(HttpResponseUtils::vendor_message("  plain text "), "plain text");
        assert_eq!(HttpResponseUtils::vendor_message(""), "no details");
    }

    #[test]
    fn test_vendor_message_is_shortened() {
        let long = "x".repeat(1_000);
        assert_eq!(HttpResponseUtils::vendor_message(&long).len(), 200);
    }

    #[test]
    fn test_error_message_carries_provider_and_details() {
        let err = HttpResponseUtils::from_status("gemini", 401, r#"{"error": {"message": "expired"}}"#);
        assert_eq!(err, AdapterError::authentication("gemini: expired"));
    }

    #[test]
    fn test_unparsable_body_is_malformed() {
        let err = HttpResponseUtils::parse_body("openai", "<html>").unwrap_err();
        assert_eq!(err.kind(), "malformed_response");

        let json = HttpResponseUtils::parse_body("openai", r#"{"ok": true}"#).unwrap();
        assert_eq!(json["ok"], true);
    }
}
