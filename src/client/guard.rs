//! Panic containment at the SDK boundary.

use crate::errors::{SdkError, SdkResult};
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

#[cfg(feature = "tracing")]
use tracing::error;

/// Run `fut`, turning a panic into an `SdkException` failure.
pub(crate) async fn catch_unexpected<F, T>(operation: &'static str, fut: F) -> SdkResult<T>
where
    F: Future<Output = SdkResult<T>>,
{
    match catch_panic(fut).await {
        Ok(result) => result,
        Err(panic_msg) => {
            #[cfg(feature = "tracing")]
            error!(operation, panic = %panic_msg, "SDK operation panicked");

            Err(SdkError::sdk_exception(format!(
                "{} failed unexpectedly: {}",
                operation, panic_msg
            )))
        }
    }
}

/// Run `fut`, reporting a panic as `Err(message)`.
pub(crate) async fn catch_panic<F: Future>(fut: F) -> Result<F::Output, String> {
    // AssertUnwindSafe: the client holds no state a panic could leave half-updated
    AssertUnwindSafe(fut)
        .catch_unwind()
        .await
        .map_err(|panic_info| panic_message(&panic_info))
}

/// Run a synchronous closure, reporting a panic as `Err(message)`.
pub(crate) fn catch_unexpected_sync<R>(f: impl FnOnce() -> R) -> Result<R, String> {
    std::panic::catch_unwind(AssertUnwindSafe(f)).map_err(|panic_info| panic_message(&panic_info))
}

fn panic_message(panic_info: &Box<dyn Any + Send>) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
