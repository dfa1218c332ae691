//! # jobdeck-retries
//!
//! Transport-level retry policy for the jobdeck API client.
//!
//! The dispatcher distinguishes two failure planes: HTTP responses, which it
//! handles itself (401 drives a refresh, everything else passes through),
//! and transport failures where no response was ever received (timeout,
//! refused connection, reset mid-request). Only the second plane is
//! retryable here, and only within a small bounded budget.
//!
//! ## Core Concepts
//!
//! - [`RetryPolicy`]: how many transport retries and how long to wait
//! - [`WaitStrategy`]: fixed or jittered delay between attempts
//! - [`TransportError`]: classification of `reqwest` send failures
//!
//! ## Example
//!
//! ```
//! use jobdeck_retries::RetryPolicy;
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::new().fixed(Duration::from_secs(1));
//! assert!(policy.allows(0));
//! assert!(!policy.allows(1));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod policy;
pub mod transport;
pub mod wait;

pub use policy::RetryPolicy;
pub use transport::TransportError;
pub use wait::WaitStrategy;
