//! Admin API client and its authenticated request pipeline

pub mod auth;
pub mod skills;
pub mod stats;
pub mod users;
pub mod workshops;

use crate::config::AuthConfig;
use crate::error::ClientError;
use crate::guard::RouteGuard;
use crate::refresh::SessionRefresher;
use crate::store::{MemoryTokenStore, TokenStore};
use crate::token::{AccessToken, expiry_of};
use crate::types::{Envelope, ErrorBody};
use chrono::{TimeDelta, Utc};
use reqwest::{Client, ClientBuilder, Method, Response, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Description of one logical API call, replayable for the single retry
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the `/admin` prefix, e.g. `/users/7`
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// Admin API client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    api_base: String,
    store: Arc<dyn TokenStore>,
    refresher: SessionRefresher,
    refresh_threshold: TimeDelta,
}

impl ApiClient {
    /// Create a new client with default configuration and an in-memory store
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Base of every endpoint, including the `/admin` prefix
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// The store this client reads and writes
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// The refresher shared by every clone of this client
    pub const fn refresher(&self) -> &SessionRefresher {
        &self.refresher
    }

    /// Guard over this client's store
    pub fn guard(&self) -> RouteGuard {
        RouteGuard::new(Arc::clone(&self.store))
    }

    /// Send a request through the session pipeline.
    ///
    /// Attaches the current access token, renews it first when it is close to
    /// expiry, and on a 401 refreshes once and replays the request. The
    /// response is returned whatever its status, except when the session
    /// cannot be recovered.
    pub async fn send(&self, request: &ApiRequest) -> Result<Response, ClientError> {
        let token = self.resolve_token().await;
        let response = self.dispatch(request, token.as_ref()).await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                info!(method = %request.method, path = %request.path, "Request unauthorized, refreshing session");
                let fresh = self.refresher.refresh().await.inspect_err(|e| {
                    warn!(error = %e, path = %request.path, "Session refresh after 401 failed");
                })?;
                self.dispatch(request, Some(&fresh)).await
            }
            StatusCode::FORBIDDEN => {
                debug!(path = %request.path, "Forbidden, not refreshing");
                Ok(response)
            }
            _ => Ok(response),
        }
    }

    /// Send a request and unwrap the `data` of a successful envelope
    pub async fn execute<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, ClientError> {
        let response = self.checked(request).await?;
        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    /// Send a request whose success body is irrelevant
    pub async fn execute_unit(&self, request: &ApiRequest) -> Result<(), ClientError> {
        self.checked(request).await.map(drop)
    }

    async fn checked(&self, request: &ApiRequest) -> Result<Response, ClientError> {
        let response = self.send(request).await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    /// Token to attach to the next request, renewed first when near expiry
    async fn resolve_token(&self) -> Option<AccessToken> {
        let token = self.store.get()?.access_token;

        let expires_at = match expiry_of(&token) {
            Ok(expires_at) => expires_at,
            Err(e) => {
                debug!(error = %e, "Access token undecodable, sending as-is");
                return Some(token);
            }
        };

        let remaining = expires_at - Utc::now();
        if remaining > self.refresh_threshold {
            return Some(token);
        }

        debug!(remaining_secs = remaining.num_seconds(), "Access token near expiry, refreshing");
        match self.refresher.refresh().await {
            Ok(fresh) => Some(fresh),
            Err(e) => {
                warn!(error = %e, "Proactive refresh failed, continuing with current token");
                Some(token)
            }
        }
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<Response, ClientError> {
        let url = format!("{}{}", self.api_base, request.path);
        let mut builder = self.client.request(request.method.clone(), url);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token.as_str()));
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        debug!(method = %request.method, path = %request.path, status = %response.status(), "API response");
        Ok(response)
    }
}

/// Map a non-success response to an error, preferring the backend's message
pub(crate) async fn error_from_response(response: Response) -> ClientError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .filter(|m| !m.is_empty())
        .or_else(|| (!text.is_empty()).then_some(text))
        .unwrap_or_else(|| status.to_string());

    ClientError::from_status(status, message)
}

/// Builder for `ApiClient`
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    store: Option<Arc<dyn TokenStore>>,
    timeout: Option<Duration>,
    refresh_timeout: Option<Duration>,
    refresh_threshold: Option<Duration>,
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    /// Set the base URL (without the `/admin` prefix)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the token store
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the request timeout
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the timeout of the refresh exchange
    pub const fn refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = Some(timeout);
        self
    }

    /// Set the remaining lifetime at which the token is renewed before sending
    pub const fn refresh_threshold(mut self, threshold: Duration) -> Self {
        self.refresh_threshold = Some(threshold);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .or_else(|| AuthConfig::BUILD_BASE_URL.map(str::to_string))
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url {base_url:?}: {e}")))?;

        // Ensure base_url ends without a trailing slash
        let api_base = format!("{}{}", base_url.trim_end_matches('/'), AuthConfig::API_PREFIX);

        let refresh_threshold = TimeDelta::from_std(
            self.refresh_threshold.unwrap_or(AuthConfig::REFRESH_THRESHOLD),
        )
        .map_err(|e| ClientError::Configuration(format!("refresh_threshold out of range: {e}")))?;

        let client = ClientBuilder::new()
            .timeout(self.timeout.unwrap_or(AuthConfig::REQUEST_TIMEOUT))
            .user_agent(
                self.user_agent
                    .unwrap_or_else(|| AuthConfig::USER_AGENT.to_string()),
            )
            .build()?;

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));

        let refresher = SessionRefresher::new(
            client.clone(),
            &api_base,
            Arc::clone(&store),
            self.refresh_timeout.unwrap_or(AuthConfig::REFRESH_TIMEOUT),
        );

        Ok(ApiClient {
            client,
            api_base,
            store,
            refresher,
            refresh_threshold,
        })
    }
}
