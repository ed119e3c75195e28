//! Transport trait definition.

use crate::errors::{RetryableError, SdkError};
use crate::types::{SmsToken, VerificationCode};
use std::error::Error as StdError;
use std::future::Future;

/// Core trait that every backend of the verification API must implement.
///
/// The client never builds requests itself; it validates locally and then
/// hands the call to a `Transport`. Backends include the HTTP transport, the
/// in-memory [`StubTransport`](crate::StubTransport) and the
/// [`RetryableTransport`](crate::RetryableTransport) wrapper.
///
/// Errors must convert into [`SdkError`]. A backend may use `SdkError` itself
/// as its error type, in which case failures reach the caller unchanged.
///
/// # Note on async methods
///
/// All async methods in this trait return `Send` futures, making them
/// compatible with multi-threaded executors.
///
/// # Example
///
/// ```rust,ignore
/// use sms_verify_sdk::{SdkError, SmsToken, Transport, VerificationCode};
///
/// struct MyTransport;
///
/// impl Transport for MyTransport {
///     type Error = SdkError;
///
///     async fn exchange_code(&self, code: &VerificationCode) -> Result<SmsToken, SdkError> {
///         // Trade the code for a token
///     }
///
///     async fn send_sms(&self, token: &SmsToken, body: &str) -> Result<(), SdkError> {
///         // Send a message on behalf of the player
///     }
///
///     async fn unregister(&self, token: &SmsToken) -> Result<(), SdkError> {
///         // Invalidate the token server-side
///     }
///
///     async fn check_registered(&self, token: &SmsToken) -> Result<bool, SdkError> {
///         // Ask the server whether the token is still registered
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Error type returned by transport operations.
    type Error: StdError + RetryableError + Into<SdkError> + Send + Sync + 'static;

    /// Exchange a verification code for a session token.
    fn exchange_code(
        &self,
        code: &VerificationCode,
    ) -> impl Future<Output = Result<SmsToken, Self::Error>> + Send;

    /// Send an SMS with the given body using the player's token.
    fn send_sms(
        &self,
        token: &SmsToken,
        body: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Invalidate the token on the server.
    fn unregister(&self, token: &SmsToken) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Ask the server whether the token is still registered.
    fn check_registered(
        &self,
        token: &SmsToken,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
