//! Callback-style twins of the awaitable operations.
//!
//! Each method spawns the matching async operation on the current Tokio
//! runtime and hands its result to the callback exactly once. The callback
//! never runs before the method returns. Without a runtime the callback is
//! invoked once with an `SdkException`.

use super::structure::SmsClient;
use crate::analytics::Analytics;
use crate::errors::{SdkError, SdkResult};
use crate::launcher::SmsLauncher;
use crate::transport::Transport;
use crate::types::SmsToken;
use std::future::Future;
use tokio::runtime::Handle;

#[cfg(feature = "tracing")]
use tracing::warn;

impl<T, L, A> SmsClient<T, L, A>
where
    T: Transport + 'static,
    L: SmsLauncher + 'static,
    A: Analytics,
{
    /// Callback form of [`process_deep_link`](Self::process_deep_link).
    pub fn process_deep_link_with_callback<F>(&self, url: impl Into<String>, callback: F)
    where
        F: FnOnce(SdkResult<SmsToken>) + Send + 'static,
    {
        let client = self.clone();
        let url = url.into();
        spawn_with_callback(
            async move { client.process_deep_link(&url).await },
            callback,
        );
    }

    /// Callback form of [`send_sms`](Self::send_sms).
    pub fn send_sms_with_callback<F>(
        &self,
        token: Option<SmsToken>,
        body: impl Into<String>,
        callback: F,
    ) where
        F: FnOnce(SdkResult<()>) + Send + 'static,
    {
        let client = self.clone();
        let body = body.into();
        spawn_with_callback(
            async move { client.send_sms(token.as_ref(), &body).await },
            callback,
        );
    }

    /// Callback form of [`unregister`](Self::unregister).
    pub fn unregister_with_callback<F>(&self, token: Option<SmsToken>, callback: F)
    where
        F: FnOnce(SdkResult<()>) + Send + 'static,
    {
        let client = self.clone();
        spawn_with_callback(
            async move { client.unregister(token.as_ref()).await },
            callback,
        );
    }

    /// Callback form of [`is_token_registered`](Self::is_token_registered).
    pub fn is_token_registered_with_callback<F>(&self, token: Option<SmsToken>, callback: F)
    where
        F: FnOnce(SdkResult<bool>) + Send + 'static,
    {
        let client = self.clone();
        spawn_with_callback(
            async move { client.is_token_registered(token.as_ref()).await },
            callback,
        );
    }
}

fn spawn_with_callback<R, Fut, F>(fut: Fut, callback: F)
where
    R: Send + 'static,
    Fut: Future<Output = SdkResult<R>> + Send + 'static,
    F: FnOnce(SdkResult<R>) + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                let result = fut.await;
                callback(result);
            });
        }
        Err(_e) => {
            #[cfg(feature = "tracing")]
            warn!(error = %_e, "No async runtime for callback operation");

            callback(Err(SdkError::sdk_exception(
                "No async runtime available to run the operation.",
            )));
        }
    }
}
