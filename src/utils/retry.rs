//! Backoff settings for transport retries.

use backon::ExponentialBuilder;
use std::time::Duration;

/// Configuration for retry behavior.
///
/// ```rust
/// use sms_verify_sdk::RetryConfig;
/// use std::time::Duration;
///
/// let config = RetryConfig::default()
///     .with_min_delay(Duration::from_millis(200))
///     .with_max_delay(Duration::from_secs(5))
///     .with_max_retries(5);
///
/// assert_eq!(config.max_retries, 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Delay before the first retry (default: 500 ms).
    pub min_delay: Duration,
    /// Upper bound for any single delay (default: 10 seconds).
    pub max_delay: Duration,
    /// Exponential backoff factor (default: 2.0).
    pub factor: f32,
    /// Retries after the first attempt (default: 3).
    pub max_retries: usize,
    /// Add random jitter to each delay (default: true).
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            factor: 2.0,
            max_retries: 3,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// A config that never retries.
    pub fn disabled() -> Self {
        Self::default().with_max_retries(0)
    }

    pub fn with_min_delay(mut self, delay: Duration) -> Self {
        self.min_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_factor(mut self, factor: f32) -> Self {
        self.factor = factor;
        self
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Build a backon strategy from this configuration.
    pub fn build_strategy(&self) -> ExponentialBuilder {
        let strategy = ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_factor(self.factor)
            .with_max_times(self.max_retries);

        if self.jitter {
            strategy.with_jitter()
        } else {
            strategy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();
        assert_eq!(config.min_delay, Duration::from_millis(500));
        assert_eq!(config.max_delay, Duration::from_secs(10));
        assert_eq!(config.max_retries, 3);
        assert!(config.jitter);
    }

    #[test]
    fn test_retry_config_disabled() {
        assert_eq!(RetryConfig::disabled().max_retries, 0);
    }

    #[test]
    fn test_retry_config_with_methods() {
        let config = RetryConfig::default()
            .with_min_delay(Duration::from_millis(1))
            .with_max_delay(Duration::from_millis(2))
            .with_factor(1.5)
            .with_max_retries(7)
            .with_jitter(false);

        assert_eq!(config.min_delay, Duration::from_millis(1));
        assert_eq!(config.max_delay, Duration::from_millis(2));
        assert_eq!(config.factor, 1.5);
        assert_eq!(config.max_retries, 7);
        assert!(!config.jitter);
    }
}
