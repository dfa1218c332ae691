//! Client configuration.

use jobdeck_retries::RetryPolicy;
use std::time::Duration;

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the REST backend.
    pub base_url: String,
    /// Timeout for each physical request attempt. Exceeding it is treated
    /// like any other transport failure.
    pub timeout: Duration,
    /// How far ahead of expiry a token counts as invalid, so a request
    /// never races expiry during network latency.
    pub validity_margin: Duration,
    /// Transport retry policy.
    pub retry: RetryPolicy,
}

impl ApiConfig {
    /// Create a config with the default 30s timeout and 30s margin.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            validity_margin: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }

    /// Set the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the token validity margin.
    #[must_use]
    pub fn with_margin(mut self, margin: Duration) -> Self {
        self.validity_margin = margin;
        self
    }

    /// Set the transport retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Load the base URL from `{PREFIX}_API_BASE_URL`, with an optional
    /// `{PREFIX}_API_TIMEOUT_SECS` override.
    pub fn from_env(prefix: &str) -> Option<Self> {
        let base_url = std::env::var(format!("{}_API_BASE_URL", prefix)).ok()?;
        let mut config = Self::new(base_url);
        if let Some(secs) = std::env::var(format!("{}_API_TIMEOUT_SECS", prefix))
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        Some(config)
    }

    /// Build an HTTP client with this config.
    pub fn build_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ApiConfig::new("https://api.jobdeck.app");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.validity_margin, Duration::from_secs(30));
        assert_eq!(config.retry.max_retries, 1);
    }

    #[test]
    fn builder_overrides() {
        let config = ApiConfig::new("https://api.jobdeck.app")
            .with_timeout(Duration::from_secs(5))
            .with_margin(Duration::from_secs(10))
            .with_retry(RetryPolicy::no_retry());
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.validity_margin, Duration::from_secs(10));
        assert_eq!(config.retry.max_retries, 0);
    }

    #[test]
    fn from_env_reads_base_url_and_timeout() {
        std::env::set_var("JOBDECK_CLIENT_TEST_API_BASE_URL", "https://api.test");
        std::env::set_var("JOBDECK_CLIENT_TEST_API_TIMEOUT_SECS", "7");

        let config = ApiConfig::from_env("JOBDECK_CLIENT_TEST").unwrap();
        assert_eq!(config.base_url, "https://api.test");
        assert_eq!(config.timeout, Duration::from_secs(7));

        std::env::remove_var("JOBDECK_CLIENT_TEST_API_BASE_URL");
        std::env::remove_var("JOBDECK_CLIENT_TEST_API_TIMEOUT_SECS");
    }
}
