//! Error types for the HTTP transport.

use crate::errors::{RetryableError, SdkError};
use thiserror::Error;

#[cfg(feature = "tracing")]
use tracing::warn;

/// Non-success answer from the verification API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("API request failed with status {status}: {message}")]
pub struct ApiServiceError {
    /// HTTP status code.
    pub status: u16,
    /// Error code from the response envelope, if the server sent one.
    pub code: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl ApiServiceError {
    /// Create a new service error and log it.
    pub fn new(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        let error = Self {
            status,
            code,
            message: message.into(),
        };

        #[cfg(feature = "tracing")]
        warn!(
            status = error.status,
            code = ?error.code,
            message = %error.message,
            "Verification API returned error"
        );

        error
    }

    /// Rate limiting and server-side failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        self.status == 429 || self.status >= 500
    }
}

/// Main error type for HTTP transport operations.
#[derive(Debug, Error)]
pub enum HttpTransportError {
    /// Failed to build HTTP client.
    #[error("Failed to build HTTP client: {0}")]
    BuildHttpClient(#[source] reqwest::Error),

    /// Error building a request URL from the base URL.
    #[error("Error building request URL: {0}")]
    BuildRequestUrl(#[source] url::ParseError),

    /// Failed to send HTTP request (connection, timeout, middleware).
    #[error("Failed to send HTTP request: {0}")]
    HttpRequest(#[from] reqwest_middleware::Error),

    /// Failed to read the response body.
    #[error("Failed to parse response: {0}")]
    ParseResponse(#[source] reqwest::Error),

    /// Failed to deserialize JSON response.
    #[error("Failed to deserialize JSON response: {0}")]
    DeserializeJson(#[source] serde_json::Error),

    /// The API answered with a non-success status.
    #[error(transparent)]
    Api(ApiServiceError),

    /// The API answered with a token the SDK cannot accept.
    #[error("API returned an invalid token: {0}")]
    InvalidToken(#[source] SdkError),
}

pub type Result<T> = std::result::Result<T, HttpTransportError>;

impl RetryableError for HttpTransportError {
    fn is_retryable(&self) -> bool {
        match self {
            // Network errors, timeouts
            HttpTransportError::HttpRequest(_) => true,
            HttpTransportError::Api(error) => error.is_retryable(),
            HttpTransportError::BuildHttpClient(_)
            | HttpTransportError::BuildRequestUrl(_)
            | HttpTransportError::ParseResponse(_)
            | HttpTransportError::DeserializeJson(_)
            | HttpTransportError::InvalidToken(_) => false,
        }
    }
}

impl From<HttpTransportError> for SdkError {
    fn from(err: HttpTransportError) -> Self {
        match err {
            HttpTransportError::Api(error) => SdkError::api(error.to_string()),
            other => SdkError::sdk_exception(other.to_string()),
        }
    }
}
