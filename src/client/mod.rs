//! The SDK facade: validation gates in front of the transport.

mod callbacks;
mod guard;
pub(crate) mod structure;

pub use structure::{SmsClient, SmsClientBuilder};
