//! Client error types

use thiserror::Error;

/// Outcome of a failed session refresh
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Network failure, timeout, server error or malformed payload.
    /// The stored session is left intact.
    #[error("Token refresh failed: {0}")]
    Transient(String),

    /// The refresh credential was rejected; the stored session has been cleared
    #[error("Session is no longer valid, login required")]
    Unauthorized,
}

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Session could not be recovered
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether the caller should drop local session state and send the
    /// user back to the login view
    pub const fn is_auth_expired(&self) -> bool {
        matches!(
            self,
            Self::Auth(AuthError::Unauthorized) | Self::AuthenticationFailed(_)
        )
    }
}
