//! Main client implementation.

use super::guard::{catch_panic, catch_unexpected, catch_unexpected_sync};
use crate::analytics::{Analytics, NoopAnalytics, REGISTRATION_INITIALIZED};
use crate::config::SdkConfig;
use crate::deep_link;
use crate::errors::{SdkError, SdkResult};
use crate::launcher::SmsLauncher;
use crate::transport::Transport;
use crate::types::{EventData, SmsToken, VerificationCode};
use std::fmt::{self, Debug};
use std::sync::Arc;
use tokio::runtime::Handle;

#[cfg(feature = "tracing")]
use tracing::warn;

/// Debug logging that honors `SdkConfig::debug_logging_enabled`.
macro_rules! sdk_debug {
    ($config:expr, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            if $config.debug_logging_enabled() {
                tracing::debug!($($arg)+);
            }
        }
    };
}

/// Client for the SMS verification service.
///
/// The client ties local validation to the [`Transport`], [`SmsLauncher`] and
/// [`Analytics`] ports. It holds no mutable state: the configuration and the
/// ports are fixed at construction, and every operation is independent.
/// Cloning is cheap and clones share the same ports.
///
/// Token lifecycle as seen by the caller:
///
/// ```text
/// Unissued ──process_deep_link──▶ Issued(valid) ──time──▶ Issued(expired)
///                                      │                        │
///                                      └──────unregister────────┴──▶ Invalidated
/// ```
///
/// | Operation | Missing token | Expired token |
/// |-----------|---------------|---------------|
/// | `send_sms` | `InvalidToken` | `InvalidToken` |
/// | `is_token_registered` | `Ok(false)`, no request | `Ok(false)`, no request |
/// | `unregister` | `InvalidToken` | forwarded to the transport |
///
/// # Example
///
/// ```rust,ignore
/// use sms_verify_sdk::{SdkConfig, SmsClient, StubTransport, SystemSmsLauncher};
///
/// let config = SdkConfig::from_env()?;
/// let client = SmsClient::new(config, StubTransport::new(), SystemSmsLauncher::new());
///
/// client.register();
///
/// // Later, from the deep link handler:
/// let token = client.process_deep_link("mygame://verify?code=tb_verify_...").await?;
/// client.send_sms(Some(&token), "Hello!").await?;
/// ```
pub struct SmsClient<T: Transport, L: SmsLauncher, A: Analytics = NoopAnalytics> {
    config: Arc<SdkConfig>,
    transport: Arc<T>,
    launcher: Arc<L>,
    analytics: Arc<A>,
}

impl<T: Transport, L: SmsLauncher, A: Analytics> Clone for SmsClient<T, L, A> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
            launcher: Arc::clone(&self.launcher),
            analytics: Arc::clone(&self.analytics),
        }
    }
}

impl<T: Transport, L: SmsLauncher, A: Analytics> Debug for SmsClient<T, L, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: Transport, L: SmsLauncher> SmsClient<T, L, NoopAnalytics> {
    /// Create a client without analytics.
    pub fn new(config: SdkConfig, transport: T, launcher: L) -> Self {
        Self::with_analytics(config, transport, launcher, NoopAnalytics)
    }

    /// Create a new builder for SmsClient.
    pub fn builder(config: SdkConfig, transport: T, launcher: L) -> SmsClientBuilder<T, L> {
        SmsClientBuilder::new(config, transport, launcher)
    }
}

impl<T: Transport, L: SmsLauncher, A: Analytics> SmsClient<T, L, A> {
    /// Create a client with every port supplied.
    pub fn with_analytics(config: SdkConfig, transport: T, launcher: L, analytics: A) -> Self {
        Self::from_parts(
            Arc::new(config),
            Arc::new(transport),
            Arc::new(launcher),
            Arc::new(analytics),
        )
    }

    /// Create a client from shared ports.
    pub fn from_parts(
        config: Arc<SdkConfig>,
        transport: Arc<T>,
        launcher: Arc<L>,
        analytics: Arc<A>,
    ) -> Self {
        Self {
            config,
            transport,
            launcher,
            analytics,
        }
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Get reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Start a registration.
    ///
    /// Generates a fresh `tb_verify_` code, opens the SMS app addressed to the
    /// configured destination number with the code as body, and emits a
    /// `RegistrationInitialized` analytics event in the background. Nothing is
    /// reported back: launcher and analytics failures are logged and dropped.
    /// The outcome arrives later through [`process_deep_link`](Self::process_deep_link).
    pub fn register(&self) {
        let code = VerificationCode::generate();
        let number = self.config.destination_phone_number();

        sdk_debug!(self.config, number = %number, "Starting SMS registration");

        match catch_unexpected_sync(|| self.launcher.open_sms_app(number, code.as_str())) {
            Ok(Ok(())) => {}
            Ok(Err(_e)) => {
                #[cfg(feature = "tracing")]
                warn!(error = %_e, "Failed to open SMS app");
            }
            Err(_panic_msg) => {
                #[cfg(feature = "tracing")]
                warn!(panic = %_panic_msg, "SMS launcher panicked");
            }
        }

        let mut data = EventData::new();
        data.insert(
            "code_prefix".to_string(),
            VerificationCode::PREFIX.to_string().into(),
        );
        self.emit_event(REGISTRATION_INITIALIZED, data);
    }

    /// Exchange the verification code carried by a deep link for a token.
    ///
    /// Fails with `InvalidDeepLink` without contacting the API when the link
    /// has no `code` parameter. Transport failures are returned as the
    /// transport reported them; panics become `SdkException`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "SmsClient::process_deep_link", skip_all)
    )]
    pub async fn process_deep_link(&self, url: &str) -> SdkResult<SmsToken> {
        catch_unexpected("process_deep_link", async {
            let Some(code) = deep_link::extract_code(Some(url)) else {
                sdk_debug!(self.config, "Deep link has no verification code");
                return Err(SdkError::invalid_deep_link(SdkError::CODE_NOT_FOUND));
            };

            let result = self
                .transport
                .exchange_code(&code)
                .await
                .map_err(Into::<SdkError>::into);

            if let Ok(_token) = &result {
                sdk_debug!(
                    self.config,
                    expires_at = %_token.expiration(),
                    "Verification code exchanged"
                );
            }
            result
        })
        .await
    }

    /// Send an SMS using the player's token.
    ///
    /// Validation order: a missing or expired token fails with
    /// `InvalidToken`, then a blank body fails with `InvalidBody`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "SmsClient::send_sms", skip_all)
    )]
    pub async fn send_sms(&self, token: Option<&SmsToken>, body: &str) -> SdkResult<()> {
        catch_unexpected("send_sms", async {
            let token = match token {
                Some(token) if !token.is_expired() => token,
                _ => return Err(SdkError::invalid_token(SdkError::TOKEN_NULL_OR_EXPIRED)),
            };
            if body.trim().is_empty() {
                return Err(SdkError::invalid_body(SdkError::BODY_EMPTY));
            }

            let result = self
                .transport
                .send_sms(token, body)
                .await
                .map_err(Into::<SdkError>::into);

            if result.is_ok() {
                sdk_debug!(self.config, body_len = body.len(), "SMS sent");
            }
            result
        })
        .await
    }

    /// Invalidate a token on the server.
    ///
    /// Only a missing token is rejected locally. Expired tokens are still
    /// sent so that stale registrations can be cleaned up. After success the
    /// caller should drop the token.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "SmsClient::unregister", skip_all)
    )]
    pub async fn unregister(&self, token: Option<&SmsToken>) -> SdkResult<()> {
        catch_unexpected("unregister", async {
            let Some(token) = token else {
                return Err(SdkError::invalid_token(SdkError::TOKEN_NULL));
            };

            let result = self
                .transport
                .unregister(token)
                .await
                .map_err(Into::<SdkError>::into);

            if result.is_ok() {
                sdk_debug!(
                    self.config,
                    was_expired = token.is_expired(),
                    "Token unregistered"
                );
            }
            result
        })
        .await
    }

    /// Check whether a token is still registered.
    ///
    /// A missing or expired token is answered with `Ok(false)` locally; only
    /// a live token is checked with the server.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "SmsClient::is_token_registered", skip_all)
    )]
    pub async fn is_token_registered(&self, token: Option<&SmsToken>) -> SdkResult<bool> {
        catch_unexpected("is_token_registered", async {
            let token = match token {
                Some(token) if !token.is_expired() => token,
                _ => {
                    sdk_debug!(self.config, "Token missing or expired, not registered");
                    return Ok(false);
                }
            };

            let result = self
                .transport
                .check_registered(token)
                .await
                .map_err(Into::<SdkError>::into);

            if let Ok(_registered) = &result {
                sdk_debug!(
                    self.config,
                    registered = *_registered,
                    "Registration status checked"
                );
            }
            result
        })
        .await
    }

    /// Emit an analytics event on the current Tokio runtime without waiting.
    fn emit_event(&self, name: &'static str, data: EventData) {
        let analytics = Arc::clone(&self.analytics);

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    match catch_panic(analytics.send_event(name, data)).await {
                        Ok(Ok(())) => {}
                        Ok(Err(_e)) => {
                            #[cfg(feature = "tracing")]
                            warn!(event = name, error = %_e, "Failed to send analytics event");
                        }
                        Err(_panic_msg) => {
                            #[cfg(feature = "tracing")]
                            warn!(event = name, panic = %_panic_msg, "Analytics sink panicked");
                        }
                    }
                });
            }
            Err(_) => {
                sdk_debug!(
                    self.config,
                    event = name,
                    "No async runtime, analytics event dropped"
                );
            }
        }
    }
}

/// Builder for SmsClient.
///
/// # Example
///
/// ```rust,ignore
/// use sms_verify_sdk::{SmsClient, TracingAnalytics};
///
/// let client = SmsClient::builder(config, transport, launcher)
///     .analytics(TracingAnalytics)
///     .build();
/// ```
pub struct SmsClientBuilder<T: Transport, L: SmsLauncher, A: Analytics = NoopAnalytics> {
    config: SdkConfig,
    transport: T,
    launcher: L,
    analytics: A,
}

impl<T: Transport, L: SmsLauncher> SmsClientBuilder<T, L, NoopAnalytics> {
    /// Create a new builder with the required ports.
    pub fn new(config: SdkConfig, transport: T, launcher: L) -> Self {
        Self {
            config,
            transport,
            launcher,
            analytics: NoopAnalytics,
        }
    }
}

impl<T: Transport, L: SmsLauncher, A: Analytics> SmsClientBuilder<T, L, A> {
    /// Set the analytics sink.
    ///
    /// Default: [`NoopAnalytics`]
    pub fn analytics<B: Analytics>(self, analytics: B) -> SmsClientBuilder<T, L, B> {
        SmsClientBuilder {
            config: self.config,
            transport: self.transport,
            launcher: self.launcher,
            analytics,
        }
    }

    /// Enable or disable SDK debug logging.
    pub fn debug_logging(mut self, enabled: bool) -> Self {
        self.config = self.config.with_debug_logging(enabled);
        self
    }

    /// Build the SmsClient.
    pub fn build(self) -> SmsClient<T, L, A> {
        SmsClient::with_analytics(self.config, self.transport, self.launcher, self.analytics)
    }
}

#[cfg(feature = "http")]
impl
    SmsClient<
        crate::transport::http::HttpTransport,
        crate::launcher::SystemSmsLauncher,
        crate::analytics::TracingAnalytics,
    >
{
    /// Create a production client: HTTP transport, system SMS launcher and
    /// tracing analytics.
    pub fn from_config(config: SdkConfig) -> SdkResult<Self> {
        let transport =
            crate::transport::http::HttpTransport::from_config(&config).map_err(SdkError::from)?;
        Ok(Self::with_analytics(
            config,
            transport,
            crate::launcher::SystemSmsLauncher::new(),
            crate::analytics::TracingAnalytics,
        ))
    }
}
