//! Authentication error types.

use thiserror::Error;

/// Terminal authentication failures.
///
/// Cloneable because a single refresh outcome is fanned out to every caller
/// waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The session could not be refreshed. The store has been cleared and
    /// the user must log in again.
    #[error("session expired, re-authentication required")]
    Expired,

    /// The login exchange was rejected by the identity backend.
    #[error("login failed with HTTP {status}: {body}")]
    LoginFailed {
        /// HTTP status returned by the login endpoint.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// The identity backend could not be reached during login. No existing
    /// session is affected.
    #[error("identity backend unreachable: {0}")]
    Unavailable(String),
}

impl AuthError {
    /// Whether the current session was invalidated by this failure.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_is_terminal() {
        assert!(AuthError::Expired.is_terminal());
        assert!(!AuthError::Unavailable("timeout".into()).is_terminal());
        assert!(!AuthError::LoginFailed {
            status: 401,
            body: "bad credentials".into()
        }
        .is_terminal());
    }

    #[test]
    fn display_carries_status() {
        let err = AuthError::LoginFailed {
            status: 403,
            body: "forbidden".into(),
        };
        assert_eq!(err.to_string(), "login failed with HTTP 403: forbidden");
    }
}
