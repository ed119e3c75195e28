//! Wire types for the verification API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of the code exchange request.
#[derive(Debug, Clone, Serialize)]
pub struct ExchangeCodeRequest<'a> {
    pub code: &'a str,
}

/// Successful code exchange.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeCodeResponse {
    /// Session token value.
    pub token: String,
    /// Absolute expiry of the token.
    pub expires_at: DateTime<Utc>,
}

/// Body of the send SMS request.
#[derive(Debug, Clone, Serialize)]
pub struct SendSmsRequest<'a> {
    pub body: &'a str,
}

/// Answer to the registration status query.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationStatusResponse {
    pub registered: bool,
}

/// Error envelope sent with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_response_camel_case() {
        let json = r#"{"token":"abc","expiresAt":"2030-01-01T00:00:00Z"}"#;
        let response: ExchangeCodeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.token, "abc");
        assert_eq!(response.expires_at.to_rfc3339(), "2030-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_error_envelope_optional_fields() {
        let envelope: ErrorEnvelope = serde_json::from_str(r#"{"error":{}}"#).unwrap();
        assert!(envelope.error.code.is_none());
        assert!(envelope.error.message.is_none());
    }
}
