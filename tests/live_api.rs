//! Integration tests against a real verification API.
//!
//! These tests make real API calls and require valid credentials.
//! They are ignored by default and should be run manually.
//!
//! # Setup
//!
//! 1. Create `tests/.env` (or export the variables):
//!    ```bash
//!    SMS_VERIFY_API_KEY=your_key
//!    SMS_VERIFY_BASE_URL=https://api.example.com
//!    SMS_VERIFY_DESTINATION_NUMBER=+15550100
//!    # Optional: a token issued by a previous registration
//!    SMS_VERIFY_PLAYER_TOKEN=...
//!    ```
//!
//! 2. Run the tests:
//!    ```bash
//!    cargo test --test live_api -- --ignored
//!    ```

#![cfg(feature = "http")]

use chrono::{TimeDelta, Utc};
use sms_verify_sdk::{
    ErrorCode, RetryConfig, RetryableTransport, SdkConfig, SmsClient, SmsToken, SystemSmsLauncher,
    TracingAnalytics,
};
use std::env;
use std::time::Duration;

/// Load the SDK configuration from the environment or `tests/.env`.
fn load_config() -> SdkConfig {
    dotenvy::from_filename("tests/.env").ok();
    dotenvy::dotenv().ok();

    SdkConfig::from_env().expect(
        "SMS_VERIFY_API_KEY, SMS_VERIFY_BASE_URL and SMS_VERIFY_DESTINATION_NUMBER must be set.\n\
         Either:\n\
         1. Create tests/.env with the variables\n\
         2. Run with: SMS_VERIFY_API_KEY=... cargo test --test live_api -- --ignored",
    )
}

/// Player token from a previous registration, valid for one hour from now.
fn player_token() -> Option<SmsToken> {
    let value = env::var("SMS_VERIFY_PLAYER_TOKEN").ok()?;
    SmsToken::new(value, Utc::now() + TimeDelta::hours(1)).ok()
}

fn create_client() -> SmsClient<sms_verify_sdk::HttpTransport, SystemSmsLauncher, TracingAnalytics>
{
    SmsClient::from_config(load_config()).expect("Failed to create client")
}

// =============================================================================
// Client Tests
// =============================================================================

/// Test that the client can be created from the environment.
#[test]
#[ignore = "requires API credentials"]
fn test_client_creation() {
    let _client = create_client();
}

/// An unknown code must be rejected by the server.
#[tokio::test]
#[ignore = "requires API credentials"]
async fn test_unknown_code_rejected() {
    let client = create_client();

    let result = client
        .process_deep_link("mygame://verify?code=tb_verify_00000000000000000000000000000000")
        .await;

    match result {
        Ok(token) => panic!("Unknown code accepted, got token expiring {}", token.expiration()),
        Err(e) => {
            println!("Rejected as expected: {}", e);
            assert_eq!(e.code, ErrorCode::ApiError);
        }
    }
}

/// Check the registration status of a real token.
#[tokio::test]
#[ignore = "requires API credentials and a player token"]
async fn test_token_status() {
    let Some(token) = player_token() else {
        println!("SMS_VERIFY_PLAYER_TOKEN not set, skipping");
        return;
    };

    let config = load_config();
    let transport = RetryableTransport::with_config(
        sms_verify_sdk::HttpTransport::from_config(&config).expect("Failed to create transport"),
        RetryConfig::default()
            .with_min_delay(Duration::from_millis(500))
            .with_max_delay(Duration::from_secs(5))
            .with_max_retries(3),
    );
    let client = SmsClient::new(config, transport, SystemSmsLauncher::new());

    match client.is_token_registered(Some(&token)).await {
        Ok(registered) => println!("Token registered: {}", registered),
        Err(e) => panic!("Unexpected error: {:?}", e),
    }
}
