//! Session tokens and expiry inspection

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Short-lived bearer credential
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

/// Credential used only to mint new access tokens
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefreshToken(String);

macro_rules! opaque_token {
    ($name:ident) => {
        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        // Never print credentials
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "(..{} chars)"), self.0.len())
            }
        }
    };
}

opaque_token!(AccessToken);
opaque_token!(RefreshToken);

/// The stored credential pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: AccessToken,
    /// Absent when the backend keeps the refresh credential in a cookie only
    pub refresh_token: Option<RefreshToken>,
}

impl Session {
    pub const fn new(access_token: AccessToken, refresh_token: Option<RefreshToken>) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }

    /// Expiry of the stored access token
    pub fn expires_at(&self) -> Result<DateTime<Utc>, DecodeError> {
        expiry_of(&self.access_token)
    }

    /// Access token expiry known and strictly in the future.
    ///
    /// An undecodable token is never authenticated here; [`RouteGuard`]
    /// layers its optimistic handling of such tokens on top of this.
    ///
    /// [`RouteGuard`]: crate::guard::RouteGuard
    pub fn is_authenticated(&self) -> bool {
        self.expires_at()
            .is_ok_and(|expires_at| expires_at > Utc::now())
    }
}

/// Failure to read the expiry claim out of an access token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Token is not a decodable JWT: {0}")]
    Malformed(String),

    #[error("Token has no exp claim")]
    MissingExpiry,

    #[error("Token exp claim {0} is out of range")]
    OutOfRange(String),
}

// NumericDate may carry a fractional part
#[derive(Deserialize)]
struct ExpiryClaim {
    #[serde(default)]
    exp: Option<f64>,
}

/// Read the `exp` claim of an access token.
///
/// The signature is not checked; the backend stays the authority on whether
/// the token is acceptable. This only tells the client when to renew.
pub fn expiry_of(token: &AccessToken) -> Result<DateTime<Utc>, DecodeError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.set_required_spec_claims::<&str>(&[]);

    let data = decode::<ExpiryClaim>(token.as_str(), &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let exp = data.claims.exp.ok_or(DecodeError::MissingExpiry)?;
    timestamp_from_numeric_date(exp).ok_or_else(|| DecodeError::OutOfRange(exp.to_string()))
}

/// Whole seconds, rounded down so a fractional expiry is never overshot
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn timestamp_from_numeric_date(exp: f64) -> Option<DateTime<Utc>> {
    let secs = exp.floor();
    if !secs.is_finite() || secs < i64::MIN as f64 || secs >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(secs as i64, 0)
}
