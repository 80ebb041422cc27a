//! Shared helpers for client integration tests

#![allow(dead_code)]

use admin_console_client::{
    AccessToken, ApiClient, MemoryTokenStore, RefreshToken, Session, TokenStore,
};
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::{Match, MockServer, Request};

/// Signed JWT whose `exp` lies `secs` seconds from now (negative for the past)
pub fn token_expiring_in(secs: i64) -> String {
    sign(&json!({
        "sub": "admin@example.com",
        "exp": Utc::now().timestamp() + secs,
    }))
}

/// Signed JWT carrying arbitrary claims
pub fn sign(claims: &Value) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(b"backend-only-secret"),
    )
    .expect("sign test token")
}

pub fn session(access: &str, refresh: Option<&str>) -> Session {
    Session::new(AccessToken::new(access), refresh.map(RefreshToken::new))
}

/// Client against the mock server with an inspectable in-memory store
pub fn client_with(server: &MockServer, session: Option<Session>) -> (ApiClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(session.map_or_else(MemoryTokenStore::new, MemoryTokenStore::with_session));
    let client = ApiClient::builder()
        .base_url(server.uri())
        .token_store(Arc::clone(&store) as Arc<dyn TokenStore>)
        .build()
        .expect("build client");
    (client, store)
}

/// Matches requests that carry no `Authorization` header
pub struct NoAuthorization;

impl Match for NoAuthorization {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}
