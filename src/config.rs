//! SDK configuration.

use crate::errors::{SdkError, SdkResult};
use secrecy::SecretString;
use std::env;
use url::Url;

/// Environment variable holding the game API key.
pub const ENV_API_KEY: &str = "SMS_VERIFY_API_KEY";
/// Environment variable holding the API base URL.
pub const ENV_BASE_URL: &str = "SMS_VERIFY_BASE_URL";
/// Environment variable holding the number players text to register.
pub const ENV_DESTINATION_NUMBER: &str = "SMS_VERIFY_DESTINATION_NUMBER";
/// Environment variable toggling SDK debug logging (`1` or `true`).
pub const ENV_DEBUG_LOGGING: &str = "SMS_VERIFY_DEBUG_LOGGING";

/// Immutable SDK configuration, validated once at construction.
///
/// # Example
///
/// ```rust
/// use sms_verify_sdk::SdkConfig;
///
/// let config = SdkConfig::builder()
///     .api_key("game-key")
///     .base_url("https://api.example.com")
///     .destination_phone_number("+15550100")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.destination_phone_number(), "+15550100");
/// assert!(!config.debug_logging_enabled());
/// ```
#[derive(Clone)]
pub struct SdkConfig {
    api_key: SecretString,
    base_url: Url,
    destination_phone_number: String,
    debug_logging_enabled: bool,
}

impl std::fmt::Debug for SdkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdkConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url.as_str())
            .field("destination_phone_number", &self.destination_phone_number)
            .field("debug_logging_enabled", &self.debug_logging_enabled)
            .finish()
    }
}

impl SdkConfig {
    /// Create a new builder for SdkConfig.
    pub fn builder() -> SdkConfigBuilder {
        SdkConfigBuilder::default()
    }

    /// Load the configuration from `SMS_VERIFY_*` environment variables.
    ///
    /// Missing variables are treated as blank and rejected by validation.
    pub fn from_env() -> SdkResult<Self> {
        let debug = env::var(ENV_DEBUG_LOGGING)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);

        Self::builder()
            .api_key(env::var(ENV_API_KEY).unwrap_or_default())
            .base_url(env::var(ENV_BASE_URL).unwrap_or_default())
            .destination_phone_number(env::var(ENV_DESTINATION_NUMBER).unwrap_or_default())
            .debug_logging(debug)
            .build()
    }

    /// Game API key sent as the bearer credential.
    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    /// Base URL of the verification API.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Number the player's SMS app is pointed at during registration.
    pub fn destination_phone_number(&self) -> &str {
        &self.destination_phone_number
    }

    /// Whether the SDK emits its own debug logs.
    pub fn debug_logging_enabled(&self) -> bool {
        self.debug_logging_enabled
    }

    /// Return a copy with debug logging switched on or off.
    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging_enabled = enabled;
        self
    }
}

/// Builder for SdkConfig.
#[derive(Debug, Clone, Default)]
pub struct SdkConfigBuilder {
    api_key: String,
    base_url: String,
    destination_phone_number: String,
    debug_logging_enabled: bool,
}

impl SdkConfigBuilder {
    /// Create a new builder with empty values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the game API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the API base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the destination phone number used by registration.
    pub fn destination_phone_number(mut self, number: impl Into<String>) -> Self {
        self.destination_phone_number = number.into();
        self
    }

    /// Enable or disable SDK debug logging.
    ///
    /// Default: disabled
    pub fn debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging_enabled = enabled;
        self
    }

    /// Validate and build the SdkConfig.
    ///
    /// Every string field must be non-blank and the base URL must be an
    /// absolute http(s) URL. Failures use `InvalidArgument`.
    pub fn build(self) -> SdkResult<SdkConfig> {
        require_non_blank("apiKey", &self.api_key)?;
        require_non_blank("baseUrl", &self.base_url)?;
        require_non_blank("destinationPhoneNumber", &self.destination_phone_number)?;

        let base_url = Url::parse(self.base_url.trim()).map_err(|e| {
            SdkError::invalid_argument(format!("baseUrl is not a valid URL: {}", e))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(SdkError::invalid_argument(format!(
                "baseUrl must use http or https, got '{}'",
                base_url.scheme()
            )));
        }

        Ok(SdkConfig {
            api_key: SecretString::from(self.api_key),
            base_url,
            destination_phone_number: self.destination_phone_number.trim().to_string(),
            debug_logging_enabled: self.debug_logging_enabled,
        })
    }
}

fn require_non_blank(field: &str, value: &str) -> SdkResult<()> {
    if value.trim().is_empty() {
        return Err(SdkError::invalid_argument(format!(
            "{} cannot be null or empty.",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use secrecy::ExposeSecret;

    fn valid_builder() -> SdkConfigBuilder {
        SdkConfig::builder()
            .api_key("key")
            .base_url("https://api.example.com/")
            .destination_phone_number(" +15550100 ")
    }

    #[test]
    fn test_config_builder() {
        let config = valid_builder().debug_logging(true).build().unwrap();

        assert_eq!(config.api_key().expose_secret(), "key");
        assert_eq!(config.base_url().as_str(), "https://api.example.com/");
        assert_eq!(config.destination_phone_number(), "+15550100");
        assert!(config.debug_logging_enabled());
    }

    #[test]
    fn test_config_rejects_blank_fields() {
        let cases = [
            valid_builder().api_key(" "),
            valid_builder().base_url(""),
            valid_builder().destination_phone_number("\t"),
        ];

        for builder in cases {
            let err = builder.build().unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidArgument);
        }
    }

    #[test]
    fn test_config_rejects_bad_urls() {
        let not_a_url = valid_builder().base_url("not a url").build().unwrap_err();
        assert_eq!(not_a_url.code, ErrorCode::InvalidArgument);

        let ftp = valid_builder().base_url("ftp://example.com").build().unwrap_err();
        assert_eq!(ftp.code, ErrorCode::InvalidArgument);
        assert!(ftp.message.contains("ftp"));
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = valid_builder().api_key("very-secret").build().unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("very-secret"));
    }

    #[test]
    fn test_config_with_debug_logging() {
        let config = valid_builder().build().unwrap().with_debug_logging(true);
        assert!(config.debug_logging_enabled());
    }
}
