//! Example demonstrating retry functionality.
//!
//! This example shows how to wrap the HTTP transport with automatic retry
//! logic for handling transient failures. Only idempotent calls (status
//! checks and unregister) are retried.
//!
//! # Running
//!
//! ```bash
//! SMS_VERIFY_API_KEY=your_api_key \
//! SMS_VERIFY_BASE_URL=https://api.example.com \
//! SMS_VERIFY_DESTINATION_NUMBER=+15550100 \
//! cargo run --example with_retry -- "mygame://verify?code=tb_verify_..."
//! ```

use sms_verify_sdk::{
    HttpTransport, RetryConfig, RetryableTransport, SdkConfig, SmsClient, SystemSmsLauncher,
    TracingAnalytics,
};
use std::env;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = SdkConfig::from_env()?;
    let deep_link = env::args()
        .nth(1)
        .expect("Pass the deep link URL as the first argument");

    // Configure retry behavior using the builder pattern
    let retry_config = RetryConfig::default()
        .with_min_delay(Duration::from_millis(500))
        .with_max_delay(Duration::from_secs(5))
        .with_factor(2.0)
        .with_max_retries(3);

    // Wrap the transport with retry logic
    let transport = RetryableTransport::with_config(HttpTransport::from_config(&config)?, retry_config)
        .with_on_retry(|error, delay| {
            println!("  Retry scheduled in {:?}: {}", delay, error);
        });

    let client = SmsClient::builder(config, transport, SystemSmsLauncher::new())
        .analytics(TracingAnalytics)
        .build();

    let token = client.process_deep_link(&deep_link).await?;
    println!("Got token expiring at {}", token.expiration());

    println!("Checking registration (with retry enabled)...");
    let registered = client.is_token_registered(Some(&token)).await?;
    println!("Registered: {}", registered);

    Ok(())
}
