//! HTTP Response Utilities
//!
//! Helper functions for vendor adapters that talk HTTP. They map status codes
//! and transport failures onto [`AdapterError`] kinds so every adapter reports
//! the same failure the same way.

use crate::constants::HTTP_ERROR_BODY_MAX_CHARS;
use prism_domain::error::AdapterError;
use prism_domain::ports::providers::AdapterResult;
use reqwest::Response;
use std::time::Duration;
use tracing::debug;

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and parse JSON
    ///
    /// # Arguments
    /// * `response` - The HTTP response to check
    /// * `provider_id` - Provider for error messages
    ///
    /// # Returns
    /// Parsed JSON value on success, or the adapter error matching the status
    pub async fn check_and_parse(
        response: Response,
        provider_id: &str,
    ) -> AdapterResult<serde_json::Value> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Self::from_status(provider_id, status.as_u16(), &error_text));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Self::from_transport(provider_id, &e))?;
        Self::parse_body(provider_id, &body)
    }

    /// Map an unsuccessful status code and its body to an adapter error
    pub fn from_status(provider_id: &str, code: u16, body: &str) -> AdapterError {
        let details = Self::vendor_message(body);
        debug!(provider = provider_id, status = code, details = %details, "Vendor rejected request");
        match code {
            401 | 403 => AdapterError::authentication(format!("{provider_id}: {details}")),
            429 => AdapterError::quota_exceeded(format!("{provider_id}: {details}")),
            408 | 504 => AdapterError::timeout(Duration::ZERO),
            500..=599 => {
                AdapterError::network(format!("{provider_id} server error ({code}): {details}"))
            }
            _ => AdapterError::vendor(format!("{provider_id} request failed ({code}): {details}")),
        }
    }

    /// Map a reqwest transport failure to an adapter error
    pub fn from_transport(provider_id: &str, error: &reqwest::Error) -> AdapterError {
        if error.is_timeout() {
            AdapterError::timeout(Duration::ZERO)
        } else if error.is_decode() {
            AdapterError::malformed(format!("{provider_id}: {error}"))
        } else {
            AdapterError::network(format!("{provider_id}: {error}"))
        }
    }

    /// Parse a successful body as JSON
    pub fn parse_body(provider_id: &str, body: &str) -> AdapterResult<serde_json::Value> {
        serde_json::from_str(body)
            .map_err(|e| AdapterError::malformed(format!("{provider_id} response parse failed: {e}")))
    }

    /// Best human-readable message in a vendor error body
    ///
    /// Understands the common `{"error": {"message": ...}}`, `{"error": "..."}`
    /// and `{"message": ...}` shapes; anything else is returned verbatim,
    /// shortened.
    pub fn vendor_message(body: &str) -> String {
        let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
        let from_json = parsed.as_ref().and_then(|json| {
            json.pointer("/error/message")
                .or_else(|| json.get("error").filter(|e| e.is_string()))
                .or_else(|| json.get("message"))
                .and_then(serde_json::Value::as_str)
        });

        let text = from_json.unwrap_or(body).trim();
        if text.is_empty() {
            return "no details".to_string();
        }
        text.chars().take(HTTP_ERROR_BODY_MAX_CHARS).collect()
    }
}
