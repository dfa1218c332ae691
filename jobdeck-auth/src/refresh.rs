//! Single-flight token refresh against the identity backend.

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::session::{Session, TokenResponse};
use crate::store::TokenStore;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

type PendingRefresh = Shared<BoxFuture<'static, Result<Arc<Session>, AuthError>>>;

/// Performs the refresh-token exchange, at most once per need.
///
/// Concurrent callers that find an exchange already in flight await its
/// outcome instead of issuing their own. The exchange runs on a spawned
/// task, so a caller dropping its await never cancels a refresh other
/// callers are still waiting on.
///
/// A refresh failure is terminal for the session: the store is invalidated
/// and every waiter gets [`AuthError::Expired`]. The refresh call itself is
/// never retried; a stale or revoked refresh token will not become valid by
/// trying again.
pub struct RefreshCoordinator {
    store: Arc<TokenStore>,
    config: AuthConfig,
    http: reqwest::Client,
    pending: Mutex<Option<PendingRefresh>>,
}

impl RefreshCoordinator {
    /// Create a coordinator writing through to `store`.
    pub fn new(store: Arc<TokenStore>, config: AuthConfig) -> Self {
        let http = config.build_client();
        Self {
            store,
            config,
            http,
            pending: Mutex::new(None),
        }
    }

    /// The store this coordinator writes through to.
    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }

    /// Exchange credentials for a first session, populating the store.
    ///
    /// A rejected login leaves any existing session untouched.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Arc<Session>, AuthError> {
        let params = [("username", username), ("password", password)];
        debug!(url = %self.config.login_url, "exchanging credentials");
        let response = self
            .http
            .post(&self.config.login_url)
            .form(&params)
            .send()
            .await
            .map_err(|err| AuthError::Unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "login rejected");
            return Err(AuthError::LoginFailed {
                status: status.as_u16(),
                body,
            });
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|err| AuthError::Unavailable(err.to_string()))?;
        let session = Session::from_token_response(tokens, None).ok_or_else(|| {
            AuthError::Unavailable("login response carried no refresh token".into())
        })?;
        Ok(self.store.update(session))
    }

    /// Make sure a valid session is available, refreshing only if needed.
    ///
    /// Fast path: the store is already valid within `margin`. Slow path:
    /// join or start the single-flight refresh.
    pub async fn ensure_fresh(
        self: &Arc<Self>,
        margin: Duration,
    ) -> Result<Arc<Session>, AuthError> {
        if self.store.is_valid(margin) {
            if let Some(session) = self.store.current() {
                return Ok(session);
            }
        }
        let stale = self.store.current().map(|s| s.access_token().to_string());
        self.refresh(stale.as_deref()).await
    }

    /// Force a refresh exchange, single-flighted across concurrent callers.
    ///
    /// `stale_token` is the access token the caller observed failing. If the
    /// store already holds a different token, another caller refreshed in
    /// the meantime and the current session is returned without a new
    /// exchange.
    pub async fn refresh(
        self: &Arc<Self>,
        stale_token: Option<&str>,
    ) -> Result<Arc<Session>, AuthError> {
        let shared = {
            let mut pending = self.pending.lock();
            if let Some(inflight) = pending.as_ref() {
                debug!("joining in-flight token refresh");
                inflight.clone()
            } else {
                let Some(current) = self.store.current() else {
                    // Logged out (or already invalidated): nothing to exchange.
                    return Err(AuthError::Expired);
                };
                if stale_token.is_some_and(|stale| stale != current.access_token()) {
                    debug!("token already refreshed by another caller");
                    return Ok(current);
                }
                let coordinator = Arc::clone(self);
                let handle = tokio::spawn(async move { coordinator.exchange().await });
                let shared: PendingRefresh = async move {
                    handle.await.map_err(|_| AuthError::Expired)?
                }
                .boxed()
                .shared();
                *pending = Some(shared.clone());
                shared
            }
        };
        shared.await
    }

    /// Run one refresh exchange. The store is settled before the pending
    /// handle is released, so late joiners observe the final state.
    async fn exchange(self: Arc<Self>) -> Result<Arc<Session>, AuthError> {
        let result = self.exchange_inner().await;
        match &result {
            Ok(session) => debug!(session = ?session, "token refresh succeeded"),
            Err(err) => {
                warn!(error = %err, "token refresh failed, invalidating session");
                self.store.invalidate(err.clone());
            }
        }
        *self.pending.lock() = None;
        result
    }

    async fn exchange_inner(&self) -> Result<Arc<Session>, AuthError> {
        let session = self.store.current().ok_or(AuthError::Expired)?;
        let body = serde_json::json!({ "refreshToken": session.refresh_token() });
        debug!(url = %self.config.token_url, "refreshing access token");

        let response = self
            .http
            .post(&self.config.token_url)
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "refresh exchange unreachable");
                AuthError::Expired
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "refresh token rejected");
            return Err(AuthError::Expired);
        }

        let tokens: TokenResponse = response.json().await.map_err(|err| {
            warn!(error = %err, "malformed refresh response");
            AuthError::Expired
        })?;
        let refreshed = Session::from_token_response(tokens, Some(session.refresh_token()))
            .ok_or(AuthError::Expired)?;
        Ok(self.store.update(refreshed))
    }
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("config", &self.config)
            .field("pending", &self.pending.lock().is_some())
            .finish()
    }
}
