//! Response parsing for the verification API.

use super::errors::ApiServiceError;
use super::types::ErrorEnvelope;
use serde::de::DeserializeOwned;

/// Unified response type for API calls that return a JSON payload.
#[derive(Debug)]
pub enum ApiResponse<T> {
    Success(T),
    Error(ApiServiceError),
}

impl<T> ApiResponse<T> {
    /// Convert response into a Result for ergonomic error handling.
    pub fn into_result(self) -> Result<T, ApiServiceError> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Error(e) => Err(e),
        }
    }

    /// Check if response is successful without consuming.
    #[allow(dead_code)]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Parse a response from its status code and raw body.
    ///
    /// Non-2xx statuses become [`ApiResponse::Error`]; 2xx bodies must be
    /// valid JSON for `T`.
    pub fn from_parts(status: u16, text: &str) -> Result<Self, serde_json::Error> {
        if !is_success_status(status) {
            return Ok(Self::Error(parse_api_error(status, text)));
        }

        let data = serde_json::from_str::<T>(text)?;
        Ok(Self::Success(data))
    }
}

/// Response type for calls whose success body is ignored.
#[derive(Debug)]
pub enum ApiEmptyResponse {
    Success,
    Error(ApiServiceError),
}

impl ApiEmptyResponse {
    /// Parse a response from its status code and raw body.
    pub fn from_parts(status: u16, text: &str) -> Self {
        if is_success_status(status) {
            Self::Success
        } else {
            Self::Error(parse_api_error(status, text))
        }
    }

    /// Convert to Result.
    pub fn into_result(self) -> Result<(), ApiServiceError> {
        match self {
            Self::Success => Ok(()),
            Self::Error(e) => Err(e),
        }
    }
}

fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Build an [`ApiServiceError`] from an error body.
///
/// Prefers the `{"error": {"code", "message"}}` envelope and falls back to the
/// raw text, then to a generic message for empty bodies.
pub(crate) fn parse_api_error(status: u16, text: &str) -> ApiServiceError {
    let envelope = serde_json::from_str::<ErrorEnvelope>(text).ok();
    let (code, message) = match envelope {
        Some(envelope) => (envelope.error.code, envelope.error.message),
        None => (None, None),
    };

    let message = message
        .filter(|m| !m.trim().is_empty())
        .or_else(|| {
            let raw = text.trim();
            (!raw.is_empty()).then(|| raw.to_string())
        })
        .unwrap_or_else(|| "no response body".to_string());

    ApiServiceError::new(status, code, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::http::types::{ExchangeCodeResponse, RegistrationStatusResponse};

    #[test]
    fn test_json_response_success() {
        let json = r#"{"token":"abc","expiresAt":"2030-01-01T00:00:00Z"}"#;
        let response = ApiResponse::<ExchangeCodeResponse>::from_parts(200, json).unwrap();
        assert!(response.is_success());
        assert_eq!(response.into_result().unwrap().token, "abc");
    }

    #[test]
    fn test_json_response_error_envelope() {
        let body = r#"{"error":{"code":"CODE_EXPIRED","message":"Verification code expired"}}"#;
        let response = ApiResponse::<ExchangeCodeResponse>::from_parts(410, body).unwrap();
        assert!(!response.is_success());

        match response.into_result() {
            Err(error) => {
                assert_eq!(error.status, 410);
                assert_eq!(error.code.as_deref(), Some("CODE_EXPIRED"));
                assert_eq!(error.message, "Verification code expired");
            }
            Ok(_) => panic!("Expected error"),
        }
    }

    #[test]
    fn test_error_falls_back_to_raw_text() {
        let error = parse_api_error(502, "Bad Gateway");
        assert_eq!(error.code, None);
        assert_eq!(error.message, "Bad Gateway");

        let empty = parse_api_error(500, "  ");
        assert_eq!(empty.message, "no response body");
    }

    #[test]
    fn test_success_with_invalid_json_is_parse_error() {
        let result = ApiResponse::<RegistrationStatusResponse>::from_parts(200, "not json");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_response() {
        assert!(ApiEmptyResponse::from_parts(204, "").into_result().is_ok());

        let err = ApiEmptyResponse::from_parts(401, r#"{"error":{"message":"Bad key"}}"#)
            .into_result()
            .unwrap_err();
        assert_eq!(err.status, 401);
        assert_eq!(err.message, "Bad key");
    }
}
