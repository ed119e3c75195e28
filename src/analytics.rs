//! Best-effort analytics events.
//!
//! The client never waits on analytics and never reports analytics failures to
//! its caller; errors are logged and dropped.

use crate::types::EventData;
use std::future::Future;
use thiserror::Error;

/// Event emitted when the player is sent to the SMS app.
pub const REGISTRATION_INITIALIZED: &str = "RegistrationInitialized";

/// Error returned by an analytics backend.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The backend could not accept the event.
    #[error("Analytics backend unavailable: {0}")]
    Unavailable(String),

    /// The event payload could not be encoded.
    #[error("Failed to encode analytics event: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Fire-and-forget event sink.
pub trait Analytics: Send + Sync + 'static {
    /// Deliver one event.
    fn send_event(
        &self,
        name: &str,
        data: EventData,
    ) -> impl Future<Output = Result<(), AnalyticsError>> + Send;
}

/// Writes events to the `sms_verify_sdk::analytics` tracing target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    async fn send_event(&self, name: &str, data: EventData) -> Result<(), AnalyticsError> {
        let payload = serde_json::to_string(&data).map_err(AnalyticsError::Encode)?;

        #[cfg(feature = "tracing")]
        tracing::info!(
            target: "sms_verify_sdk::analytics",
            event = name,
            data = %payload,
            "Analytics event"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = (name, payload);

        Ok(())
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl Analytics for NoopAnalytics {
    async fn send_event(&self, _name: &str, _data: EventData) -> Result<(), AnalyticsError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builtin_sinks_accept_events() {
        let mut data = EventData::new();
        data.insert("code_prefix".to_string(), "tb_verify_".into());

        assert!(
            TracingAnalytics
                .send_event(REGISTRATION_INITIALIZED, data.clone())
                .await
                .is_ok()
        );
        assert!(
            NoopAnalytics
                .send_event(REGISTRATION_INITIALIZED, data)
                .await
                .is_ok()
        );
    }
}
