//! Retryable transport wrapper.

use super::traits::Transport;
use crate::errors::RetryableError;
use crate::types::{SmsToken, VerificationCode};
use crate::utils::retry::RetryConfig;
use backon::Retryable;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "tracing")]
use tracing::debug;

/// Callback type for retry notifications.
///
/// Invoked each time a retry is scheduled, with the error that caused it and
/// the delay before the next attempt.
pub type OnRetryCallback<E> = Arc<dyn Fn(&E, Duration) + Send + Sync>;

/// Wrapper that adds automatic retries to any [`Transport`].
///
/// Only idempotent operations are retried:
///
/// | Operation | Retried |
/// |-----------|---------|
/// | `check_registered` | yes |
/// | `unregister` | yes |
/// | `exchange_code` | no, codes are single use |
/// | `send_sms` | no, a retry could deliver the message twice |
///
/// A call is repeated only while its error reports `is_retryable()`.
///
/// # Example
///
/// ```rust,ignore
/// use sms_verify_sdk::{HttpTransport, RetryConfig, RetryableTransport};
/// use std::time::Duration;
///
/// let transport = HttpTransport::from_config(&config)?;
/// let retryable = RetryableTransport::with_config(
///     transport,
///     RetryConfig::default().with_max_retries(5),
/// )
/// .with_on_retry(|error, delay| eprintln!("retrying in {:?}: {}", delay, error));
/// ```
pub struct RetryableTransport<T: Transport> {
    inner: Arc<T>,
    retry_config: RetryConfig,
    on_retry: Option<OnRetryCallback<T::Error>>,
}

impl<T: Transport> Clone for RetryableTransport<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            retry_config: self.retry_config.clone(),
            on_retry: self.on_retry.clone(),
        }
    }
}

impl<T: Transport + Debug> Debug for RetryableTransport<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryableTransport")
            .field("inner", &self.inner)
            .field("retry_config", &self.retry_config)
            .field("on_retry", &self.on_retry.as_ref().map(|_| "..."))
            .finish()
    }
}

impl<T: Transport> RetryableTransport<T> {
    /// Wrap a transport with the default retry configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, RetryConfig::default())
    }

    /// Wrap a transport with a custom retry configuration.
    pub fn with_config(inner: T, retry_config: RetryConfig) -> Self {
        Self {
            inner: Arc::new(inner),
            retry_config,
            on_retry: None,
        }
    }

    /// Set a callback invoked on each retry attempt.
    pub fn with_on_retry<F>(mut self, callback: F) -> Self
    where
        F: Fn(&T::Error, Duration) + Send + Sync + 'static,
    {
        self.on_retry = Some(Arc::new(callback));
        self
    }

    /// Get reference to the inner transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Get reference to the retry configuration.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }
}

impl<T: Transport> Transport for RetryableTransport<T> {
    type Error = T::Error;

    async fn exchange_code(&self, code: &VerificationCode) -> Result<SmsToken, Self::Error> {
        self.inner.exchange_code(code).await
    }

    async fn send_sms(&self, token: &SmsToken, body: &str) -> Result<(), Self::Error> {
        self.inner.send_sms(token, body).await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "RetryableTransport::unregister", skip_all)
    )]
    async fn unregister(&self, token: &SmsToken) -> Result<(), Self::Error> {
        let inner = Arc::clone(&self.inner);
        let token = token.clone();
        let on_retry = self.on_retry.clone();
        (|| {
            let inner = Arc::clone(&inner);
            let token = token.clone();
            async move { inner.unregister(&token).await }
        })
        .retry(self.retry_config.build_strategy())
        .when(|err: &Self::Error| err.is_retryable())
        .notify(move |err, duration| {
            if let Some(ref callback) = on_retry {
                callback(err, duration);
            }

            #[cfg(feature = "tracing")]
            debug!(
                error = %err,
                retry_after_secs = %duration.as_secs_f64(),
                "Retrying unregister"
            );
        })
        .await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "RetryableTransport::check_registered", skip_all)
    )]
    async fn check_registered(&self, token: &SmsToken) -> Result<bool, Self::Error> {
        let inner = Arc::clone(&self.inner);
        let token = token.clone();
        let on_retry = self.on_retry.clone();
        (|| {
            let inner = Arc::clone(&inner);
            let token = token.clone();
            async move { inner.check_registered(&token).await }
        })
        .retry(self.retry_config.build_strategy())
        .when(|err: &Self::Error| err.is_retryable())
        .notify(move |err, duration| {
            if let Some(ref callback) = on_retry {
                callback(err, duration);
            }

            #[cfg(feature = "tracing")]
            debug!(
                error = %err,
                retry_after_secs = %duration.as_secs_f64(),
                "Retrying check_registered"
            );
        })
        .await
    }
}
