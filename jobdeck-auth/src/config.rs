//! Identity backend configuration.

use std::time::Duration;

/// Endpoints and timing for the identity backend.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token refresh endpoint.
    pub token_url: String,
    /// Credential login endpoint.
    pub login_url: String,
    /// Timeout for each exchange request.
    pub timeout: Duration,
}

impl AuthConfig {
    /// Create a config with the default 30s exchange timeout.
    pub fn new(token_url: impl Into<String>, login_url: impl Into<String>) -> Self {
        Self {
            token_url: token_url.into(),
            login_url: login_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the exchange timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load endpoints from environment variables with the given prefix.
    ///
    /// Looks for `{PREFIX}_TOKEN_URL` and `{PREFIX}_LOGIN_URL`; returns
    /// `None` unless both are set.
    pub fn from_env(prefix: &str) -> Option<Self> {
        let token_url = std::env::var(format!("{}_TOKEN_URL", prefix)).ok()?;
        let login_url = std::env::var(format!("{}_LOGIN_URL", prefix)).ok()?;
        Some(Self::new(token_url, login_url))
    }

    /// Build an HTTP client configured for exchange calls.
    pub fn build_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .unwrap_or_default()
    }
}
