//! Persisted auth state and the session context handed to domains.
//!
//! The app stores the bearer token and the user-type marker in device
//! storage. Domains never read storage themselves: a [`SessionContext`] is
//! loaded once and injected at construction.

use std::path::{Path, PathBuf};

use medpost_model::{RecordId, SessionIdentity, UserRole};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_DIR: &str = "medpost";
const SESSION_FILE: &str = "session.json";

const TOKEN_ENV: &str = "MEDPOST_TOKEN";
const USER_TYPE_ENV: &str = "MEDPOST_USER_TYPE";
const USER_ID_ENV: &str = "MEDPOST_USER_ID";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("IO error while accessing session storage: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session storage is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read-only view of who is signed in and how to authenticate requests.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    token: Option<String>,
    /// Survives a missing user id; only self-exclusion needs the id.
    role: Option<UserRole>,
    identity: Option<SessionIdentity>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("has_token", &self.token.is_some())
            .field("role", &self.role)
            .field("identity", &self.identity)
            .finish()
    }
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(token: Option<String>, identity: Option<SessionIdentity>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            role: identity.as_ref().map(|identity| identity.role),
            identity,
        }
    }

    /// A session whose role is known but whose user id is not.
    pub fn with_role(token: Option<String>, role: Option<UserRole>) -> Self {
        Self {
            role,
            ..Self::new(token, None)
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.role
    }

    pub fn is_worker(&self) -> bool {
        self.role == Some(UserRole::Worker)
    }

    pub fn from_stored(stored: StoredSession) -> Self {
        let role = stored
            .user_type
            .as_deref()
            .and_then(|raw| match raw.parse::<UserRole>() {
                Ok(role) => Some(role),
                Err(e) => {
                    log::warn!("[Session] Ignoring stored user type: {}", e);
                    None
                }
            });

        match (role, stored.user_id) {
            (Some(role), Some(user_id)) if !user_id.trim().is_empty() => Self::new(
                stored.token,
                Some(SessionIdentity::new(RecordId::new(user_id), role)),
            ),
            _ => Self::with_role(stored.token, role),
        }
    }
}

/// On-disk shape of the persisted auth state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredSession {
    pub token: Option<String>,
    pub user_type: Option<String>,
    pub user_id: Option<String>,
}

impl StoredSession {
    /// Apply `MEDPOST_TOKEN`, `MEDPOST_USER_TYPE` and `MEDPOST_USER_ID`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            self.token = Some(token);
        }
        if let Ok(user_type) = std::env::var(USER_TYPE_ENV) {
            self.user_type = Some(user_type);
        }
        if let Ok(user_id) = std::env::var(USER_ID_ENV) {
            self.user_id = Some(user_id);
        }
        self
    }
}

/// JSON-file backed session storage.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform config directory, if the platform has one.
    pub fn default_location() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::at(dir.join(APP_DIR).join(SESSION_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session. A missing file is an anonymous session.
    pub fn read(&self) -> Result<StoredSession, SessionError> {
        if !self.path.exists() {
            return Ok(StoredSession::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load(&self) -> Result<SessionContext, SessionError> {
        self.read().map(SessionContext::from_stored)
    }

    pub fn save(&self, stored: &StoredSession) -> Result<(), SessionError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(stored)?)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
