//! Gateway client configuration

use std::time::Duration;

/// Default upstream request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default retry attempts for retryable failures
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default cap on order pages fetched per aggregation call
pub const DEFAULT_MAX_PAGES: u32 = 8;

/// Order-fetch gateway configuration
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the edge proxy in front of the storefront admin API
    pub base_url: String,
    /// Access token forwarded to the proxy, if it does not hold its own
    pub access_token: Option<String>,
    /// Upstream request timeout in seconds
    pub timeout: u64,
    /// Retry attempts for network / 5xx / 429 failures
    pub max_retries: u32,
    /// Cap on pages fetched per call; a warning is logged when hit
    pub max_pages: u32,
}

impl StorefrontConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Ad-platform client configuration
#[derive(Debug, Clone)]
pub struct AdsConfig {
    /// Graph API base URL
    pub base_url: String,
    /// Ad account identifier (numeric part, without the `act_` prefix)
    pub account_id: Option<String>,
    pub access_token: Option<String>,
    pub timeout: u64,
    pub max_retries: u32,
}

impl Default for AdsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://graph.facebook.com/v19.0".into(),
            account_id: None,
            access_token: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Exchange-rate client configuration
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    pub base_url: String,
    pub timeout: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.exchangerate-api.com/v4/latest".into(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Exponential backoff delay for a retry attempt (1s, 2s, 4s, capped at 5s)
pub(crate) fn backoff_delay(attempt: u32) -> Duration {
    let millis = 1000u64.saturating_mul(1 << attempt.min(4));
    Duration::from_millis(millis.min(5000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_delay_caps_at_five_seconds() {
        assert_eq!(backoff_delay(0), Duration::from_millis(1000));
        assert_eq!(backoff_delay(1), Duration::from_millis(2000));
        assert_eq!(backoff_delay(2), Duration::from_millis(4000));
        assert_eq!(backoff_delay(3), Duration::from_millis(5000));
        assert_eq!(backoff_delay(10), Duration::from_millis(5000));
    }
}
