//! Error model shared by every SDK operation.
//!
//! Every public operation returns [`SdkResult<T>`]. A failure carries an
//! [`SdkError`], which pairs a machine-readable [`ErrorCode`] with a
//! human-readable message.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Result type returned by every SDK operation.
///
/// `Ok` is the success variant, `Err` the failure variant. Reading the value of
/// a failure (for example with `unwrap`) panics, so callers must check
/// `is_ok()` or match before using the value.
pub type SdkResult<T> = std::result::Result<T, SdkError>;

/// Machine-readable failure taxonomy.
///
/// The string form (see [`ErrorCode::as_str`]) is stable and is what gets
/// serialized and reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// A constructor argument failed validation (blank token value, blank config field).
    InvalidArgument,
    /// Token is missing or expired where a live token is required.
    InvalidToken,
    /// Message body is empty.
    InvalidBody,
    /// Deep link does not carry a verification code.
    InvalidDeepLink,
    /// The remote API reported a non-success outcome.
    ApiError,
    /// Anything unexpected caught at the SDK boundary.
    SdkException,
}

impl ErrorCode {
    /// Returns the taxonomy key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "InvalidArgument",
            Self::InvalidToken => "InvalidToken",
            Self::InvalidBody => "InvalidBody",
            Self::InvalidDeepLink => "InvalidDeepLink",
            Self::ApiError => "ApiError",
            Self::SdkException => "SdkException",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure payload carried by [`SdkResult`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct SdkError {
    /// Taxonomy key.
    pub code: ErrorCode,
    /// Human-readable description.
    pub message: String,
}

impl SdkError {
    pub(crate) const TOKEN_NULL_OR_EXPIRED: &'static str = "SMS Token is null or expired.";
    pub(crate) const TOKEN_NULL: &'static str = "SMS Token cannot be null.";
    pub(crate) const BODY_EMPTY: &'static str = "SMS body cannot be empty.";
    pub(crate) const CODE_NOT_FOUND: &'static str =
        "Verification code not found in deep link URL.";

    /// Create an error from a code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidArgument, message)
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidToken, message)
    }

    pub fn invalid_body(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidBody, message)
    }

    pub fn invalid_deep_link(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidDeepLink, message)
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiError, message)
    }

    pub fn sdk_exception(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SdkException, message)
    }
}

/// Trait for errors that can be classified as transient or permanent.
///
/// The retry wrapper ([`RetryableTransport`](crate::RetryableTransport)) only
/// repeats a call when its error reports `is_retryable() == true`.
///
/// # Examples
///
/// ```rust
/// use sms_verify_sdk::RetryableError;
///
/// enum MyError {
///     ConnectionReset,
///     Unauthorized,
/// }
///
/// impl RetryableError for MyError {
///     fn is_retryable(&self) -> bool {
///         matches!(self, MyError::ConnectionReset)
///     }
/// }
/// ```
pub trait RetryableError {
    /// Returns true if this error represents a transient failure
    /// that might succeed if the same request is sent again.
    ///
    /// Examples: network timeouts, rate limits, temporary service unavailability.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for SdkError {
    // Already mapped into the public taxonomy; transport detail is gone.
    fn is_retryable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_keys() {
        let cases = [
            (ErrorCode::InvalidArgument, "InvalidArgument"),
            (ErrorCode::InvalidToken, "InvalidToken"),
            (ErrorCode::InvalidBody, "InvalidBody"),
            (ErrorCode::InvalidDeepLink, "InvalidDeepLink"),
            (ErrorCode::ApiError, "ApiError"),
            (ErrorCode::SdkException, "SdkException"),
        ];

        for (code, key) in cases {
            assert_eq!(code.as_str(), key);
            assert_eq!(code.to_string(), key);
        }
    }

    #[test]
    fn test_error_code_serializes_as_key() {
        let json = serde_json::to_string(&ErrorCode::InvalidDeepLink).unwrap();
        assert_eq!(json, r#""InvalidDeepLink""#);
    }

    #[test]
    fn test_sdk_error_display() {
        let err = SdkError::invalid_body(SdkError::BODY_EMPTY);
        assert_eq!(err.to_string(), "InvalidBody: SMS body cannot be empty.");
    }

    #[test]
    fn test_success_and_failure_are_complements() {
        let ok: SdkResult<u32> = Ok(7);
        let failed: SdkResult<u32> = Err(SdkError::api("boom"));

        assert!(ok.is_ok() && !ok.is_err());
        assert!(failed.is_err() && !failed.is_ok());
        assert_eq!(ok.unwrap(), 7);
    }

    #[test]
    #[should_panic]
    fn test_reading_failure_value_panics() {
        let failed: SdkResult<bool> = Err(SdkError::invalid_token(SdkError::TOKEN_NULL));
        let _ = failed.unwrap();
    }

    #[test]
    fn test_sdk_error_is_not_retryable() {
        assert!(!SdkError::api("status 503").is_retryable());
    }
}
