//! Caller-facing error taxonomy.

use jobdeck_auth::AuthError;
use thiserror::Error;

/// Terminal outcome of a dispatched request.
///
/// Locally recovered failures (one transport retry, one post-refresh retry)
/// never surface here; everything that does is final for the call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The session is gone; the caller must re-authenticate. The token
    /// store has already been cleared.
    #[error("session expired, re-authentication required")]
    AuthExpired,

    /// Transport failure that persisted through the retry budget. The
    /// session itself is still valid and the caller may retry manually.
    #[error("network error: {0}")]
    Network(String),

    /// Any other HTTP error response, passed through verbatim with no
    /// retry and no session impact.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },
}

impl ApiError {
    /// HTTP status, when this is a passed-through response error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the caller must send the user back to login.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::AuthExpired)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Expired => ApiError::AuthExpired,
            AuthError::LoginFailed { status, body } => ApiError::Http { status, body },
            AuthError::Unavailable(msg) => ApiError::Network(msg),
        }
    }
}

/// Result type for dispatched requests.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_expired_requires_login() {
        assert!(ApiError::AuthExpired.requires_login());
        assert!(!ApiError::Network("timeout".into()).requires_login());
    }

    #[test]
    fn status_only_for_http_errors() {
        let err = ApiError::Http {
            status: 503,
            body: "maintenance".into(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(ApiError::AuthExpired.status(), None);
    }

    #[test]
    fn auth_errors_map_onto_the_taxonomy() {
        assert!(matches!(
            ApiError::from(AuthError::Expired),
            ApiError::AuthExpired
        ));
        assert!(matches!(
            ApiError::from(AuthError::Unavailable("refused".into())),
            ApiError::Network(_)
        ));
        assert_eq!(
            ApiError::from(AuthError::LoginFailed {
                status: 401,
                body: "bad credentials".into()
            })
            .status(),
            Some(401)
        );
    }
}
