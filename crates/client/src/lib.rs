//! Admin console API client
//!
//! Talks to the admin REST backend on behalf of an interactive shell. The
//! client owns the whole access-token lifecycle: it attaches the bearer
//! token, renews it shortly before it expires, and recovers from a rejected
//! token by refreshing once and replaying the request. Callers only see
//! typed resources or a terminal [`AuthError::Unauthorized`].

pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod refresh;
pub mod store;
pub mod token;
pub mod types;

pub use client::{ApiClient, ApiClientBuilder, ApiRequest};
pub use error::{AuthError, ClientError};
pub use guard::RouteGuard;
pub use refresh::SessionRefresher;
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use token::{AccessToken, DecodeError, RefreshToken, Session, expiry_of};

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
