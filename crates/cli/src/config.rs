//! Console configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! config file, then `ADMIN_*` environment variables.

use admin_console_client::config::AuthConfig;
use admin_console_client::{ApiClient, TokenStore};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Backend used when neither the build nor the configuration names one
const FALLBACK_BASE_URL: &str = "http://localhost:8080";

/// Console settings
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Backend origin, without the `/admin` prefix
    pub base_url: String,

    /// Timeout for ordinary API requests in seconds
    pub request_timeout_secs: u64,

    /// Timeout for the token refresh exchange in seconds
    pub refresh_timeout_secs: u64,

    /// Renew the access token when it has this many seconds left or fewer
    pub refresh_threshold_secs: u64,

    /// Where the session tokens are kept (defaults to `<data dir>/session.json`)
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl ConsoleConfig {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value cannot be parsed
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default(
                "base_url",
                AuthConfig::BUILD_BASE_URL.unwrap_or(FALLBACK_BASE_URL),
            )?
            .set_default("request_timeout_secs", AuthConfig::REQUEST_TIMEOUT.as_secs())?
            .set_default("refresh_timeout_secs", AuthConfig::REFRESH_TIMEOUT.as_secs())?
            .set_default(
                "refresh_threshold_secs",
                AuthConfig::REFRESH_THRESHOLD.as_secs(),
            )?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("ADMIN"))
            .build()
            .context("Failed to load configuration")?;

        Ok(settings.try_deserialize()?)
    }

    /// Token file location
    pub fn session_path(&self, data_dir: &Path) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(|| data_dir.join("session.json"))
    }

    /// Build an API client over the given token store
    pub fn build_client(&self, store: Arc<dyn TokenStore>) -> Result<ApiClient> {
        let client = ApiClient::builder()
            .base_url(&self.base_url)
            .token_store(store)
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .refresh_timeout(Duration::from_secs(self.refresh_timeout_secs))
            .refresh_threshold(Duration::from_secs(self.refresh_threshold_secs))
            .build()?;
        Ok(client)
    }
}

/// State directory: explicit flag, then `ADMIN_CONSOLE_STATE_DIR`, then the
/// platform data directory
pub fn resolve_data_dir(data_dir: Option<PathBuf>) -> PathBuf {
    data_dir.unwrap_or_else(|| {
        std::env::var("ADMIN_CONSOLE_STATE_DIR").map_or_else(
            |_| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("admin-console")
            },
            PathBuf::from,
        )
    })
}
