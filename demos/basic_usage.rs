//! Basic usage example for the SMS verification SDK.
//!
//! Starts a registration, then exchanges the deep link the verification
//! service sends back and uses the resulting token.
//!
//! # Running
//!
//! ```bash
//! SMS_VERIFY_API_KEY=your_api_key \
//! SMS_VERIFY_BASE_URL=https://api.example.com \
//! SMS_VERIFY_DESTINATION_NUMBER=+15550100 \
//! cargo run --example basic_usage -- "mygame://verify?code=tb_verify_..."
//! ```

use sms_verify_sdk::{SdkConfig, SmsClient};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Reads SMS_VERIFY_* variables; SMS_VERIFY_DEBUG_LOGGING=1 adds SDK debug output
    let config = SdkConfig::from_env()?;
    let client = SmsClient::from_config(config)?;

    let Some(deep_link) = env::args().nth(1) else {
        // No deep link yet: open the SMS app with a fresh verification code
        println!("Opening SMS app to start registration...");
        client.register();

        // Give the analytics event a moment to flush
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        println!("Send the SMS, then rerun with the deep link you receive.");
        return Ok(());
    };

    let token = client.process_deep_link(&deep_link).await?;
    println!("Got token:");
    println!("  Expires at: {}", token.expiration());

    let registered = client.is_token_registered(Some(&token)).await?;
    println!("  Registered: {}", registered);

    client.send_sms(Some(&token), "Hello from basic_usage!").await?;
    println!("SMS sent");

    client.unregister(Some(&token)).await?;
    println!("Token unregistered");

    Ok(())
}
