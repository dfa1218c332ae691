//! # jobdeck-auth
//!
//! Token lifecycle for the jobdeck dashboard: the credential pair for one
//! signed-in user, the store that owns it, and the coordinator that keeps it
//! fresh.
//!
//! ## Core Concepts
//!
//! - [`Session`]: access/refresh token pair with an absolute expiry
//! - [`TokenStore`]: single owner of the current session; snapshot reads,
//!   atomic replacement on write
//! - [`RefreshCoordinator`]: performs the refresh exchange against the
//!   identity backend, at most once per need regardless of how many callers
//!   are waiting
//! - [`AuthConfig`]: identity backend endpoints and timing
//!
//! ## Single-flight refresh
//!
//! Any number of concurrent requests can notice an expired token at the same
//! moment. The coordinator holds at most one in-flight exchange; later
//! callers join it and every waiter observes the same outcome. A refresh
//! failure is terminal for the session: the store is cleared and the caller
//! must re-authenticate.
//!
//! ## Example
//!
//! ```ignore
//! use jobdeck_auth::{AuthConfig, RefreshCoordinator, TokenStore};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let store = Arc::new(TokenStore::new());
//! let config = AuthConfig::new(
//!     "https://api.example.com/auth/refresh",
//!     "https://api.example.com/auth/login",
//! );
//! let auth = Arc::new(RefreshCoordinator::new(store.clone(), config));
//!
//! let session = auth.login("me@example.com", "hunter2").await?;
//! assert!(store.is_valid(Duration::from_secs(30)));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod refresh;
pub mod session;
pub mod store;

pub use config::AuthConfig;
pub use error::AuthError;
pub use refresh::RefreshCoordinator;
pub use session::{Session, TokenResponse};
pub use store::TokenStore;
