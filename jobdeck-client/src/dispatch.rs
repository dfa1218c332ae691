//! The authenticated request dispatcher.

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use jobdeck_auth::{AuthError, RefreshCoordinator, TokenStore};
use jobdeck_retries::TransportError;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Per-call bookkeeping: how much of each retry budget is spent.
///
/// One logical call may involve several physical attempts; this caps them.
#[derive(Debug, Default)]
struct RequestAttempt {
    transport_retries: u32,
    refreshed: bool,
}

/// The single gateway for authenticated calls to the REST backend.
///
/// Callers supply a method, path, and body; the dispatcher owns the
/// credential handling end to end:
///
/// 1. refresh ahead of expiry, within the configured validity margin
/// 2. attach the bearer token
/// 3. on 401, force exactly one refresh and retry once
/// 4. on a transport failure, retry within the policy budget
/// 5. pass every other HTTP error through verbatim
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    auth: Arc<RefreshCoordinator>,
}

impl ApiClient {
    /// Create a client for the configured backend.
    pub fn new(config: ApiConfig, auth: Arc<RefreshCoordinator>) -> Self {
        let http = config.build_client();
        Self { http, config, auth }
    }

    /// The token store shared with the refresh coordinator.
    pub fn store(&self) -> &Arc<TokenStore> {
        self.auth.store()
    }

    /// Execute a GET request.
    pub async fn get(&self, path: &str) -> ApiResult<Response> {
        self.request(Method::GET, path, Option::<&()>::None).await
    }

    /// Execute a DELETE request.
    pub async fn delete(&self, path: &str) -> ApiResult<Response> {
        self.request(Method::DELETE, path, Option::<&()>::None).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Response> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// Execute a PUT request with a JSON body.
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Response> {
        self.request(Method::PUT, path, Some(body)).await
    }

    /// Execute a PATCH request with a JSON body.
    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<Response> {
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// GET and deserialize a JSON payload.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.get(path).await?;
        response
            .json()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))
    }

    /// POST a JSON body and deserialize the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.post(path, body).await?;
        response
            .json()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))
    }

    /// Dispatch one logical request.
    ///
    /// On success the response is returned unchanged; every failure is one
    /// of the [`ApiError`] terminal outcomes.
    pub async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<Response> {
        let url = self.url(path);
        let mut attempt = RequestAttempt::default();

        // Refresh up front when the token is inside the validity margin, so
        // the request never races expiry mid-flight.
        if !self.store().is_valid(self.config.validity_margin) {
            self.auth.ensure_fresh(self.config.validity_margin).await?;
        }

        loop {
            let session = self.store().current().ok_or(ApiError::AuthExpired)?;
            debug!(method = %method, url = %url, "dispatching request");

            let mut builder = self
                .http
                .request(method.clone(), &url)
                .bearer_auth(session.access_token());
            if let Some(body) = body {
                builder = builder.json(body);
            }

            let response = match builder.send().await {
                Ok(response) => response,
                Err(err) => {
                    let transport = TransportError::from(err);
                    if transport.is_retryable()
                        && self.config.retry.allows(attempt.transport_retries)
                    {
                        attempt.transport_retries += 1;
                        let delay = self.config.retry.delay();
                        debug!(
                            retry = attempt.transport_retries,
                            delay_ms = delay.as_millis() as u64,
                            error = %transport,
                            "transport failure, retrying"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    warn!(error = %transport, "transport retry budget exhausted");
                    return Err(ApiError::Network(transport.to_string()));
                }
            };

            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            if status == StatusCode::UNAUTHORIZED {
                if attempt.refreshed {
                    // The retried call was rejected again: terminal.
                    warn!("request rejected after refresh, invalidating session");
                    self.store().invalidate(AuthError::Expired);
                    return Err(ApiError::AuthExpired);
                }
                attempt.refreshed = true;
                debug!("401 response, forcing token refresh");
                self.auth.refresh(Some(session.access_token())).await?;
                continue;
            }

            let body_text = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: body_text,
            });
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .finish()
    }
}
