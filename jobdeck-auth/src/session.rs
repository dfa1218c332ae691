//! Session credentials and the token wire format.

use std::fmt;
use std::time::{Duration, Instant};

/// Token payload returned by the identity backend.
///
/// The backend speaks camelCase JSON. `refreshToken` may be omitted on a
/// refresh response, in which case the previous refresh token stays in
/// effect.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Short-lived bearer credential for API calls.
    pub access_token: String,
    /// Long-lived credential used solely to mint new access tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token, in seconds.
    pub expires_in: u64,
}

impl fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &mask(&self.access_token))
            .field("refresh_token", &self.refresh_token.as_deref().map(mask))
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// One authenticated user's credential state.
///
/// Immutable once built; the refresh coordinator replaces the whole session
/// in the store rather than mutating fields in place.
#[derive(Clone)]
pub struct Session {
    access_token: String,
    refresh_token: String,
    expires_at: Instant,
}

impl Session {
    /// Create a session expiring `expires_in` from now.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in: Duration,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_at: Instant::now() + expires_in,
        }
    }

    /// Build a session from a token exchange, carrying the previous refresh
    /// token forward when the backend omits one.
    ///
    /// Returns `None` when no refresh token is available from either source;
    /// such a session could never be renewed.
    pub fn from_token_response(
        response: TokenResponse,
        previous_refresh: Option<&str>,
    ) -> Option<Self> {
        let refresh_token = response
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_owned))?;
        Some(Self {
            access_token: response.access_token,
            refresh_token,
            expires_at: Instant::now() + Duration::from_secs(response.expires_in),
        })
    }

    /// The bearer credential to attach to API calls.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The credential used to mint new access tokens.
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Absolute expiry of the access token.
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// Whether the access token is still valid `margin` from now.
    ///
    /// A token exactly `margin` away counts as invalid.
    pub fn valid_for(&self, margin: Duration) -> bool {
        Instant::now() + margin < self.expires_at
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &mask(&self.access_token))
            .field("refresh_token", &mask(&self.refresh_token))
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Mask a credential for logs: a short prefix, then asterisks.
fn mask(token: &str) -> String {
    match token.get(..4) {
        Some(prefix) if token.len() > 8 => format!("{prefix}********"),
        _ => "********".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(29, false)]
    #[case(30, false)]
    #[case(31, true)]
    fn margin_boundary(#[case] expires_in: u64, #[case] valid: bool) {
        let session = Session::new("access", "refresh", Duration::from_secs(expires_in));
        assert_eq!(session.valid_for(Duration::from_secs(30)), valid);
    }

    #[test]
    fn from_response_keeps_new_refresh_token() {
        let session = Session::from_token_response(
            TokenResponse {
                access_token: "access-2".into(),
                refresh_token: Some("refresh-2".into()),
                expires_in: 3600,
            },
            Some("refresh-1"),
        )
        .unwrap();
        assert_eq!(session.refresh_token(), "refresh-2");
        assert!(session.valid_for(Duration::from_secs(30)));
    }

    #[test]
    fn from_response_carries_previous_refresh_token_forward() {
        let session = Session::from_token_response(
            TokenResponse {
                access_token: "access-2".into(),
                refresh_token: None,
                expires_in: 3600,
            },
            Some("refresh-1"),
        )
        .unwrap();
        assert_eq!(session.refresh_token(), "refresh-1");
    }

    #[test]
    fn from_response_without_any_refresh_token_is_rejected() {
        let session = Session::from_token_response(
            TokenResponse {
                access_token: "access-2".into(),
                refresh_token: None,
                expires_in: 3600,
            },
            None,
        );
        assert!(session.is_none());
    }

    #[test]
    fn debug_masks_tokens() {
        let session = Session::new(
            "secret-access-token",
            "secret-refresh-token",
            Duration::from_secs(60),
        );
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-access-token"));
        assert!(!rendered.contains("secret-refresh-token"));
        assert!(rendered.contains("secr********"));
    }

    #[test]
    fn wire_format_is_camel_case() {
        let parsed: TokenResponse = serde_json::from_str(
            r#"{"accessToken":"a","refreshToken":"r","expiresIn":3600}"#,
        )
        .unwrap();
        assert_eq!(parsed.access_token, "a");
        assert_eq!(parsed.refresh_token.as_deref(), Some("r"));
        assert_eq!(parsed.expires_in, 3600);
    }
}
