//! Session refresh
//!
//! Exchanges the refresh credential for a new access token. Concurrent
//! callers are coalesced onto one in-flight exchange so the backend never
//! sees the same refresh credential twice at once.

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::store::TokenStore;
use crate::token::{AccessToken, Session};
use crate::types::{Envelope, RefreshData};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use reqwest::{Client, StatusCode, header};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;
use tracing::{debug, info, warn};

type RefreshFlight = Shared<BoxFuture<'static, Result<AccessToken, AuthError>>>;

/// Single-flight token refresher
#[derive(Clone)]
pub struct SessionRefresher {
    exchange: Arc<Exchange>,
    in_flight: Arc<Mutex<Option<RefreshFlight>>>,
}

struct Exchange {
    client: Client,
    url: String,
    store: Arc<dyn TokenStore>,
    timeout: Duration,
}

impl SessionRefresher {
    /// Create a refresher that calls `{api_base}/refresh`
    pub fn new(
        client: Client,
        api_base: &str,
        store: Arc<dyn TokenStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            exchange: Arc::new(Exchange {
                client,
                url: format!("{api_base}/refresh"),
                store,
                timeout,
            }),
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    /// Obtain a new access token.
    ///
    /// If another refresh is already running, waits for it and returns its
    /// result instead of starting a second exchange.
    pub async fn refresh(&self) -> Result<AccessToken, AuthError> {
        self.flight().await
    }

    /// Join the running exchange or start a new one.
    ///
    /// The exchange empties the slot itself as soon as it settles, so a
    /// finished result is never handed to a later caller even if every
    /// waiter was dropped.
    fn flight(&self) -> RefreshFlight {
        let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(flight) = slot.as_ref() {
            debug!("Joining in-flight token refresh");
            return flight.clone();
        }

        let exchange = Arc::clone(&self.exchange);
        let in_flight = Arc::downgrade(&self.in_flight);
        let flight = async move {
            let result = exchange.run().await;
            settle(&in_flight);
            result
        }
        .boxed()
        .shared();
        *slot = Some(flight.clone());
        flight
    }
}

fn settle(in_flight: &Weak<Mutex<Option<RefreshFlight>>>) {
    if let Some(in_flight) = in_flight.upgrade() {
        *in_flight.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl Exchange {
    async fn run(&self) -> Result<AccessToken, AuthError> {
        let previous = self.store.get();

        let mut request = self.client.get(&self.url).timeout(self.timeout);
        if let Some(refresh) = previous.as_ref().and_then(|s| s.refresh_token.as_ref()) {
            request = request.header(
                header::COOKIE,
                format!("{}={}", AuthConfig::REFRESH_TOKEN_KEY, refresh.as_str()),
            );
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Token refresh request failed");
            AuthError::Transient(e.to_string())
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(%status, "Refresh credential rejected, clearing session");
            self.store.clear();
            return Err(AuthError::Unauthorized);
        }
        if !status.is_success() {
            warn!(%status, "Token refresh returned an error status");
            return Err(AuthError::Transient(format!("refresh returned {status}")));
        }

        let envelope: Envelope<RefreshData> = response.json().await.map_err(|e| {
            warn!(error = %e, "Token refresh response could not be parsed");
            AuthError::Transient(format!("malformed refresh response: {e}"))
        })?;
        let access_token = envelope
            .data
            .new_access_token
            .filter(|token| !token.is_empty())
            .map(AccessToken::new)
            .ok_or_else(|| {
                warn!("Token refresh response carried no access token");
                AuthError::Transient("refresh response carried no access token".into())
            })?;

        let refresh_token = previous.and_then(|s| s.refresh_token);
        self.store.set(&Session::new(access_token.clone(), refresh_token));

        info!("Access token refreshed");
        Ok(access_token)
    }
}
