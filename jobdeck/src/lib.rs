//! # jobdeck
//!
//! The client core of the jobdeck job-search dashboard: token lifecycle,
//! single-flight refresh, and an authenticated request dispatcher for the
//! REST backend. Page rendering, forms, and the rest of the dashboard live
//! elsewhere; everything that touches a credential lives here.
//!
//! ## Quick Start
//!
//! ```ignore
//! use jobdeck::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ApiError> {
//!     let store = Arc::new(TokenStore::new());
//!     let auth = Arc::new(RefreshCoordinator::new(
//!         store,
//!         AuthConfig::new(
//!             "https://api.jobdeck.app/auth/refresh",
//!             "https://api.jobdeck.app/auth/login",
//!         ),
//!     ));
//!     auth.login("me@example.com", "hunter2").await?;
//!
//!     let client = ApiClient::new(ApiConfig::new("https://api.jobdeck.app"), auth);
//!     let jobs: serde_json::Value = client.get_json("/api/v1/jobs").await?;
//!     println!("{jobs}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! jobdeck is organized as a workspace of focused crates:
//!
//! - [`auth`] — session, token store, refresh coordinator
//! - [`retries`] — transport retry policy and backoff
//! - [`client`] — the authenticated request dispatcher

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub use jobdeck_auth as auth;
pub use jobdeck_client as client;
pub use jobdeck_retries as retries;

/// Prelude for common imports.
pub mod prelude {
    pub use jobdeck_auth::{
        AuthConfig, AuthError, RefreshCoordinator, Session, TokenResponse, TokenStore,
    };
    pub use jobdeck_client::{ApiClient, ApiConfig, ApiError, ApiResult};
    pub use jobdeck_retries::{RetryPolicy, TransportError, WaitStrategy};
}

#[cfg(test)]
mod tests {
    #[test]
    fn prelude_imports() {
        use crate::prelude::*;

        let policy = RetryPolicy::new().max_retries(2);
        assert_eq!(policy.max_retries, 2);

        let config = ApiConfig::new("https://api.jobdeck.app");
        assert_eq!(config.retry.max_retries, 1);
    }
}
