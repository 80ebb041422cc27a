//! Client defaults

use std::time::Duration;

/// Session and transport defaults
pub struct AuthConfig;

impl AuthConfig {
    /// Storage key for the access token
    pub const ACCESS_TOKEN_KEY: &'static str = "adminAccessToken";

    /// Storage key for the refresh token, also the refresh cookie name
    pub const REFRESH_TOKEN_KEY: &'static str = "adminRefreshToken";

    /// Path prefix of every backend endpoint
    pub const API_PREFIX: &'static str = "/admin";

    /// Route the shell navigates to when the session is gone
    pub const LOGIN_ROUTE: &'static str = "/login";

    /// Remaining lifetime at or below which the token is renewed before sending
    pub const REFRESH_THRESHOLD: Duration = Duration::from_secs(120);

    /// Upper bound on a single refresh exchange
    pub const REFRESH_TIMEOUT: Duration = Duration::from_secs(5);

    /// Upper bound on ordinary API requests
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default user agent
    pub const USER_AGENT: &'static str = concat!("admin-console-client/", env!("CARGO_PKG_VERSION"));

    /// Base URL baked in at build time, if `ADMIN_URL_BASE` was set
    pub const BUILD_BASE_URL: Option<&'static str> = option_env!("ADMIN_URL_BASE");
}
