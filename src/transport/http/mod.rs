//! Reqwest-backed transport for the verification API.
//!
//! # Wire protocol
//!
//! | Operation | Request | Success body |
//! |-----------|---------|--------------|
//! | exchange | `POST v1/sms/token` `{"code"}` | `{"token", "expiresAt"}` |
//! | send | `POST v1/sms/send` `{"body"}` | ignored |
//! | unregister | `DELETE v1/sms/token` | ignored |
//! | check | `GET v1/sms/token/status` | `{"registered"}` |
//!
//! All requests carry `Authorization: Bearer <api key>`; player calls also
//! carry `X-Player-Token`. Non-2xx answers may include an
//! `{"error": {"code", "message"}}` envelope.

pub mod client;
pub mod errors;
mod response;
pub mod types;

pub use client::{DEFAULT_TIMEOUT, HttpTransport, HttpTransportBuilder, PLAYER_TOKEN_HEADER};
pub use errors::{ApiServiceError, HttpTransportError};
