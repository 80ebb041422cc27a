//! Login and logout

use super::{ApiClient, error_from_response};
use crate::error::ClientError;
use crate::token::{AccessToken, RefreshToken, Session};
use crate::types::{Envelope, LoginData, LoginRequest};
use tracing::{info, warn};

impl ApiClient {
    /// Exchange credentials for a session and store it.
    ///
    /// Goes straight to the backend: no bearer token, no refresh handling.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let url = format!("{}/login", self.api_base);
        let response = self
            .client
            .post(url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            let error = error_from_response(response).await;
            warn!(error = %error, "Login rejected");
            return Err(error);
        }

        let envelope: Envelope<LoginData> = response.json().await?;
        let access_token = envelope
            .data
            .token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ClientError::InvalidResponse("login response did not contain an access token".into())
            })?;

        let session = Session::new(
            AccessToken::new(access_token),
            envelope.data.refresh_token.map(RefreshToken::new),
        );
        self.store.set(&session);

        info!(
            has_refresh_token = session.refresh_token.is_some(),
            "Logged in"
        );
        Ok(session)
    }

    /// Forget the stored session
    pub fn logout(&self) {
        self.store.clear();
        info!("Logged out");
    }

    /// The stored access token, if any
    pub fn access_token(&self) -> Option<AccessToken> {
        self.store.get().map(|session| session.access_token)
    }
}
