//! Core types for SMS verification operations.

use crate::errors::{SdkError, SdkResult};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt::{self, Display, Formatter};
use uuid::Uuid;

// =============================================================================
// SmsToken
// =============================================================================

/// Session token obtained by exchanging a verification code.
///
/// The token is an immutable value: two tokens are equal when both the value
/// and the expiration are equal. It is only built through [`SmsToken::new`],
/// which rejects blank values.
///
/// The SDK never stores or deletes tokens. Holding on to the token between
/// calls, and discarding it after [`unregister`](crate::SmsClient::unregister),
/// is the caller's job.
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, Utc};
/// use sms_verify_sdk::SmsToken;
///
/// let token = SmsToken::new("abc123", Utc::now() + Duration::hours(1)).unwrap();
/// assert!(!token.is_expired());
///
/// assert!(SmsToken::new("   ", Utc::now()).is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SmsToken {
    value: String,
    expiration: DateTime<Utc>,
}

impl SmsToken {
    /// Create a new token.
    ///
    /// Fails with [`ErrorCode::InvalidArgument`](crate::ErrorCode::InvalidArgument)
    /// when `value` is empty or whitespace.
    pub fn new(value: impl Into<String>, expiration: DateTime<Utc>) -> SdkResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(SdkError::invalid_argument(
                "SMS Token value cannot be null or empty.",
            ));
        }
        Ok(Self { value, expiration })
    }

    /// Get the token value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Get the absolute expiration instant.
    pub fn expiration(&self) -> DateTime<Utc> {
        self.expiration
    }

    /// Returns true once the current time has reached the expiration.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Returns true if `now` is at or past the expiration.
    ///
    /// The expiration instant itself counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiration
    }

    /// Time left before expiry, or `None` if the token is already expired.
    pub fn time_remaining(&self) -> Option<TimeDelta> {
        let now = Utc::now();
        if self.is_expired_at(now) {
            None
        } else {
            Some(self.expiration - now)
        }
    }
}

impl fmt::Debug for SmsToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsToken")
            .field("value", &"[REDACTED]")
            .field("expiration", &self.expiration)
            .finish()
    }
}

#[derive(Serialize, Deserialize)]
struct RawSmsToken {
    value: String,
    expiration: DateTime<Utc>,
}

impl Serialize for SmsToken {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        RawSmsToken {
            value: self.value.clone(),
            expiration: self.expiration,
        }
        .serialize(s)
    }
}

impl<'de> Deserialize<'de> for SmsToken {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = RawSmsToken::deserialize(d)?;
        SmsToken::new(raw.value, raw.expiration).map_err(de::Error::custom)
    }
}

// =============================================================================
// VerificationCode
// =============================================================================

/// One-time code correlating the SMS sent by the player with the pending
/// registration. It round-trips through the verification service and comes
/// back in the deep link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Prefix of every locally generated code.
    pub const PREFIX: &'static str = "tb_verify_";

    /// Create a code from an existing string (e.g. one read from a deep link).
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Generate a fresh, unguessable code: the prefix followed by a random
    /// v4 UUID in simple form.
    pub fn generate() -> Self {
        Self(format!("{}{}", Self::PREFIX, Uuid::new_v4().simple()))
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VerificationCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for VerificationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for VerificationCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl From<&str> for VerificationCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

// =============================================================================
// EventData
// =============================================================================

/// Payload attached to an analytics event.
pub type EventData = serde_json::Map<String, serde_json::Value>;
