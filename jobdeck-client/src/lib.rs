//! # jobdeck-client
//!
//! The authenticated gateway to the jobdeck REST backend.
//!
//! Every outbound call goes through [`ApiClient`]: it attaches the bearer
//! credential from the shared token store, refreshes the token ahead of
//! expiry (and once more on a 401), retries a transport failure within the
//! configured budget, and maps every terminal outcome onto the
//! [`ApiError`] taxonomy. Callers never handle tokens themselves.
//!
//! ## Example
//!
//! ```ignore
//! use jobdeck_auth::{AuthConfig, RefreshCoordinator, TokenStore};
//! use jobdeck_client::{ApiClient, ApiConfig};
//! use std::sync::Arc;
//!
//! let store = Arc::new(TokenStore::new());
//! let auth = Arc::new(RefreshCoordinator::new(
//!     store,
//!     AuthConfig::new("https://api.jobdeck.app/auth/refresh", "https://api.jobdeck.app/auth/login"),
//! ));
//! let client = ApiClient::new(ApiConfig::new("https://api.jobdeck.app"), auth);
//!
//! let jobs: Vec<Job> = client.get_json("/api/v1/jobs").await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod error;

pub use config::ApiConfig;
pub use dispatch::ApiClient;
pub use error::{ApiError, ApiResult};
