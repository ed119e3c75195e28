//! Backends for the verification API.

pub(crate) mod retryable;
pub(crate) mod stub;
pub(crate) mod traits;

#[cfg(feature = "http")]
pub mod http;

pub use retryable::{OnRetryCallback, RetryableTransport};
pub use stub::{StubCall, StubTransport};
pub use traits::Transport;
