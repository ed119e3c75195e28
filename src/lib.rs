//! # SMS Verify SDK
//!
//! Client SDK for deep-link based SMS phone verification.
//!
//! A game (or any app) asks the player to send a generated verification code
//! by SMS. The verification service answers with a deep link carrying the
//! code, which the SDK exchanges for a time-limited [`SmsToken`]. The token
//! then authorizes sending SMS messages on the player's behalf, checking the
//! registration status and unregistering.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sms_verify_sdk::{SdkConfig, SmsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SdkConfig::builder()
//!         .api_key("your_api_key")
//!         .base_url("https://api.example.com")
//!         .destination_phone_number("+15551234567")
//!         .build()?;
//!
//!     let client = SmsClient::from_config(config)?;
//!
//!     // Opens the SMS app with a fresh verification code
//!     client.register();
//!
//!     // Later, when the app receives the deep link
//!     let token = client
//!         .process_deep_link("mygame://verify?code=tb_verify_0123abcd")
//!         .await?;
//!
//!     client.send_sms(Some(&token), "Hello from the game!").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! SmsClient<T, L, A>
//!     │
//!     ├──▶ RetryableTransport<T>   (optional retry wrapper)
//!     │          │
//!     │          ▼
//!     │      Transport             (trait: HttpTransport, StubTransport, ...)
//!     │
//!     ├──▶ SmsLauncher             (trait: SystemSmsLauncher, closures)
//!     │
//!     └──▶ Analytics               (trait: TracingAnalytics, NoopAnalytics)
//! ```
//!
//! Every operation has an awaitable form returning [`SdkResult`] and a
//! callback form (`*_with_callback`) that runs on the current Tokio runtime.
//!
//! ## Features
//!
//! - `http` - reqwest-backed [`HttpTransport`] (enabled by default)
//! - `tracing` - tracing instrumentation with OpenTelemetry support (enabled by default)

pub mod analytics;
pub mod client;
pub mod config;
pub mod deep_link;
pub mod errors;
pub mod launcher;
pub mod transport;
pub mod types;
mod utils;

// Re-export commonly used types at the crate root
pub use analytics::{Analytics, AnalyticsError, NoopAnalytics, TracingAnalytics};
pub use client::{SmsClient, SmsClientBuilder};
pub use config::{SdkConfig, SdkConfigBuilder};
pub use errors::{ErrorCode, RetryableError, SdkError, SdkResult};
pub use launcher::{LaunchError, SmsLauncher, SmsUriStyle, SystemSmsLauncher};
pub use transport::{
    OnRetryCallback, RetryableTransport, StubCall, StubTransport, Transport,
};
pub use types::{EventData, SmsToken, VerificationCode};
pub use utils::retry::RetryConfig;

#[cfg(feature = "http")]
pub use transport::http::{ApiServiceError, HttpTransport, HttpTransportBuilder, HttpTransportError};
