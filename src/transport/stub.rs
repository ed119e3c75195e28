//! Deterministic in-memory transport.

use super::traits::Transport;
use crate::errors::SdkError;
use crate::types::{SmsToken, VerificationCode};
use chrono::{TimeDelta, Utc};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Call recorded by [`StubTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StubCall {
    ExchangeCode { code: String },
    SendSms { token: String, body: String },
    Unregister { token: String },
    CheckRegistered { token: String },
}

#[derive(Debug, Clone)]
struct StubConfig {
    token_ttl: TimeDelta,
    registered: bool,
    failure: Option<SdkError>,
}

#[derive(Debug)]
struct StubState {
    config: Mutex<StubConfig>,
    calls: Mutex<Vec<StubCall>>,
}

/// Transport that answers locally without touching the network.
///
/// - `exchange_code` returns a token `stub_<code>` valid for the configured TTL
/// - `send_sms` and `unregister` succeed
/// - `check_registered` returns the configured answer
///
/// Every call is recorded. Clones share the configuration and the log, so a
/// test can hand one clone to the client and keep configuring or inspecting
/// another.
///
/// # Example
///
/// ```rust
/// use sms_verify_sdk::{StubTransport, SdkError};
///
/// let stub = StubTransport::new().with_registered(false);
/// let failing = StubTransport::new().with_failure(SdkError::api("status 503"));
/// assert_eq!(stub.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct StubTransport {
    state: Arc<StubState>,
}

impl Default for StubTransport {
    fn default() -> Self {
        Self {
            state: Arc::new(StubState {
                config: Mutex::new(StubConfig {
                    token_ttl: TimeDelta::hours(1),
                    registered: true,
                    failure: None,
                }),
                calls: Mutex::new(Vec::new()),
            }),
        }
    }
}

impl StubTransport {
    /// Create a stub with default answers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how long exchanged tokens stay valid.
    ///
    /// Default: 1 hour
    pub fn with_token_ttl(self, ttl: TimeDelta) -> Self {
        self.config().token_ttl = ttl;
        self
    }

    /// Set the answer returned by `check_registered`.
    ///
    /// Default: `true`
    pub fn with_registered(self, registered: bool) -> Self {
        self.config().registered = registered;
        self
    }

    /// Make every operation fail with `error`.
    pub fn with_failure(self, error: SdkError) -> Self {
        self.config().failure = Some(error);
        self
    }

    /// Snapshot of recorded calls, oldest first.
    pub fn calls(&self) -> Vec<StubCall> {
        self.log().clone()
    }

    /// Number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.log().len()
    }

    fn config(&self) -> MutexGuard<'_, StubConfig> {
        self.state
            .config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn log(&self) -> MutexGuard<'_, Vec<StubCall>> {
        self.state
            .calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Record `call` and return the current configuration, or the configured failure.
    fn record(&self, call: StubCall) -> Result<StubConfig, SdkError> {
        self.log().push(call);
        let config = self.config().clone();
        match config.failure {
            Some(err) => Err(err),
            None => Ok(config),
        }
    }
}

impl Transport for StubTransport {
    type Error = SdkError;

    async fn exchange_code(&self, code: &VerificationCode) -> Result<SmsToken, SdkError> {
        let config = self.record(StubCall::ExchangeCode {
            code: code.to_string(),
        })?;
        SmsToken::new(format!("stub_{}", code), Utc::now() + config.token_ttl)
    }

    async fn send_sms(&self, token: &SmsToken, body: &str) -> Result<(), SdkError> {
        self.record(StubCall::SendSms {
            token: token.value().to_string(),
            body: body.to_string(),
        })
        .map(|_| ())
    }

    async fn unregister(&self, token: &SmsToken) -> Result<(), SdkError> {
        self.record(StubCall::Unregister {
            token: token.value().to_string(),
        })
        .map(|_| ())
    }

    async fn check_registered(&self, token: &SmsToken) -> Result<bool, SdkError> {
        let config = self.record(StubCall::CheckRegistered {
            token: token.value().to_string(),
        })?;
        Ok(config.registered)
    }
}
