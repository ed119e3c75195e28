//! Example demonstrating the callback API.
//!
//! Uses the in-memory stub transport, so no credentials are needed.
//!
//! # Running
//!
//! ```bash
//! cargo run --example callbacks
//! ```

use sms_verify_sdk::{LaunchError, SdkConfig, SmsClient, StubTransport, TracingAnalytics};
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let config = SdkConfig::builder()
        .api_key("demo-key")
        .base_url("https://api.example.com")
        .destination_phone_number("+15550100")
        .debug_logging(true)
        .build()?;

    // Print the SMS instead of opening an app
    let launcher = |number: &str, body: &str| -> Result<(), LaunchError> {
        println!("Would text {:?} to {}", body, number);
        Ok(())
    };

    let client = SmsClient::builder(config, StubTransport::new(), launcher)
        .analytics(TracingAnalytics)
        .build();

    client.register();

    let (tx, rx) = oneshot::channel();
    client.process_deep_link_with_callback("mygame://verify?code=tb_verify_demo", move |result| {
        let _ = tx.send(result);
    });
    let token = rx.await??;
    println!("Got token {:?}", token);

    let (tx, rx) = oneshot::channel();
    client.send_sms_with_callback(Some(token.clone()), "", move |result| {
        let _ = tx.send(result);
    });
    match rx.await? {
        Ok(()) => println!("Sent"),
        Err(e) => println!("Rejected as expected: {}", e),
    }

    let (tx, rx) = oneshot::channel();
    client.unregister_with_callback(Some(token), move |result| {
        let _ = tx.send(result);
    });
    rx.await??;
    println!("Unregistered");

    Ok(())
}
