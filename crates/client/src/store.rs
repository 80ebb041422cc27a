//! Token storage
//!
//! The store is a plain key/value surface holding the access and refresh
//! tokens under two fixed keys. It performs no validation; deciding whether
//! a token is still usable is the job of the request pipeline and the route
//! guard.

use crate::config::AuthConfig;
use crate::token::{AccessToken, RefreshToken, Session};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Process-wide holder of the current session
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    /// Current session, if an access token is stored
    fn get(&self) -> Option<Session>;

    /// Replace both stored tokens
    fn set(&self, session: &Session);

    /// Remove both stored tokens
    fn clear(&self);
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    session: Mutex<Option<Session>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a session
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<Session> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, session: &Session) {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
    }

    fn clear(&self) {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Durable store backed by a JSON object file.
///
/// The file holds the two tokens under [`AuthConfig::ACCESS_TOKEN_KEY`] and
/// [`AuthConfig::REFRESH_TOKEN_KEY`], so the session survives restarts of
/// the shell. Concurrent processes sharing the file are not coordinated.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Option<Map<String, Value>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read token file");
                return None;
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(entries)) => Some(entries),
            Ok(_) | Err(_) => {
                warn!(path = %self.path.display(), "Token file is not a JSON object, ignoring it");
                None
            }
        }
    }

    fn write_entries(&self, entries: Map<String, Value>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&Value::Object(entries))?;
        std::fs::write(&self.path, content)
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<Session> {
        let entries = self.read_entries()?;
        let access = entries.get(AuthConfig::ACCESS_TOKEN_KEY)?.as_str()?;
        let refresh = entries
            .get(AuthConfig::REFRESH_TOKEN_KEY)
            .and_then(Value::as_str)
            .map(RefreshToken::new);

        Some(Session::new(AccessToken::new(access), refresh))
    }

    fn set(&self, session: &Session) {
        let mut entries = Map::new();
        entries.insert(
            AuthConfig::ACCESS_TOKEN_KEY.to_string(),
            Value::String(session.access_token.as_str().to_string()),
        );
        if let Some(refresh) = &session.refresh_token {
            entries.insert(
                AuthConfig::REFRESH_TOKEN_KEY.to_string(),
                Value::String(refresh.as_str().to_string()),
            );
        }

        if let Err(e) = self.write_entries(entries) {
            warn!(path = %self.path.display(), error = %e, "Failed to persist session");
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to remove token file"),
        }
    }
}
