//! Route guard for protected views

use crate::config::AuthConfig;
use crate::store::TokenStore;
use std::sync::Arc;
use tracing::debug;

/// Local-only check deciding whether a protected view may be entered.
///
/// Never touches the network and never refreshes; when it says no, the
/// routing layer sends the user to [`RouteGuard::LOGIN_ROUTE`].
#[derive(Clone)]
pub struct RouteGuard {
    store: Arc<dyn TokenStore>,
}

impl RouteGuard {
    pub const LOGIN_ROUTE: &'static str = AuthConfig::LOGIN_ROUTE;

    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Allowed when the stored session is authenticated, or when its access
    /// token is undecodable (the backend gets the final say on the latter)
    pub fn is_allowed(&self) -> bool {
        let Some(session) = self.store.get() else {
            return false;
        };
        if session.is_authenticated() {
            return true;
        }

        match session.expires_at() {
            Ok(_) => false,
            Err(e) => {
                debug!(error = %e, "Access token undecodable, allowing optimistically");
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockTokenStore;
    use crate::token::{AccessToken, RefreshToken, Session};
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    fn token_expiring_in(secs: i64) -> AccessToken {
        let claims = json!({ "sub": "admin", "exp": Utc::now().timestamp() + secs });
        AccessToken::new(
            encode(&Header::default(), &claims, &EncodingKey::from_secret(b"k")).unwrap(),
        )
    }

    fn guard_over(session: Option<Session>) -> RouteGuard {
        let mut store = MockTokenStore::new();
        store.expect_get().times(1).return_const(session);
        store.expect_set().never();
        store.expect_clear().never();
        RouteGuard::new(Arc::new(store))
    }

    #[test]
    fn test_no_session_is_rejected() {
        assert!(!guard_over(None).is_allowed());
    }

    #[test]
    fn test_live_token_is_allowed() {
        let session = Session::new(token_expiring_in(600), Some(RefreshToken::new("R1")));
        assert!(guard_over(Some(session)).is_allowed());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let session = Session::new(token_expiring_in(-5), Some(RefreshToken::new("R1")));
        assert!(!guard_over(Some(session)).is_allowed());
    }

    #[test]
    fn test_undecodable_token_is_allowed() {
        let session = Session::new(AccessToken::new("A1"), None);
        assert!(guard_over(Some(session)).is_allowed());
    }

    #[test]
    fn test_expired_fractional_token_is_rejected() {
        let claims = json!({ "exp": Utc::now().timestamp() as f64 - 0.5 });
        let token = AccessToken::new(
            encode(&Header::default(), &claims, &EncodingKey::from_secret(b"k")).unwrap(),
        );
        assert!(!guard_over(Some(Session::new(token, None))).is_allowed());
    }
}
