//! Session persistence
//!
//! The bearer credential and the few profile fields shown offline live in a
//! local JSON file. The store is the single authority over it: `begin` on a
//! successful login/signup, `end` on logout. Everything else only reads.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::utils::AppError;

/// Opaque bearer token attached to every authenticated gateway call
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token; blank tokens are not credentials
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Signed-in user as persisted between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub email: String,
    pub name: String,
}

impl Session {
    pub fn credential(&self) -> Option<BearerToken> {
        BearerToken::new(self.token.clone())
    }
}

/// In-memory copy of the session, mirrored to disk on every change
pub struct SessionStore {
    session: RwLock<Option<Session>>,
    file_path: PathBuf,
}

impl SessionStore {
    /// Open the store at `file_path`, loading a previous session if present.
    ///
    /// A corrupt file is treated as signed out.
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let file_path = file_path.into();
        info!("Session file path: {:?}", file_path);

        if let Some(dir) = file_path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .map_err(|e| AppError::FileIo(format!("Failed to create session dir: {}", e)))?;
            }
        }

        let session = if file_path.exists() {
            let content = fs::read_to_string(&file_path)
                .map_err(|e| AppError::FileIo(format!("Failed to read session: {}", e)))?;
            match serde_json::from_str::<Session>(&content) {
                Ok(session) => {
                    info!("Restored session for {}", session.email);
                    Some(session)
                }
                Err(e) => {
                    warn!("Failed to parse session file, starting signed out: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            session: RwLock::new(session),
            file_path,
        })
    }

    /// Store that never touches disk; used by tests and one-shot runs
    pub fn in_memory(session: Option<Session>) -> Self {
        Self {
            session: RwLock::new(session),
            file_path: PathBuf::new(),
        }
    }

    /// Default location: `<config dir>/session.json`
    pub fn default_path() -> Result<PathBuf, AppError> {
        let config_dir = directories::ProjectDirs::from("com", "example", "bank-app")
            .ok_or_else(|| AppError::FileIo("Could not determine config directory".to_string()))?
            .config_dir()
            .to_path_buf();
        Ok(config_dir.join("session.json"))
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn is_persistent(&self) -> bool {
        !self.file_path.as_os_str().is_empty()
    }

    /// Current session, if signed in
    pub fn current(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Credential for gateway calls; `None` when signed out or the token is blank
    pub fn credential(&self) -> Option<BearerToken> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(Session::credential)
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential().is_some()
    }

    /// Start a session and persist it
    pub fn begin(&self, session: Session) -> Result<(), AppError> {
        info!("Starting session for user {}", session.user_id);
        if self.is_persistent() {
            let content = serde_json::to_string_pretty(&session)
                .map_err(|e| AppError::Serialization(format!("Failed to serialize session: {}", e)))?;
            fs::write(&self.file_path, content)
                .map_err(|e| AppError::FileIo(format!("Failed to write session: {}", e)))?;
        }

        *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        Ok(())
    }

    /// Forget the session and remove the persisted copy
    pub fn end(&self) -> Result<(), AppError> {
        self.session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if self.is_persistent() && self.file_path.exists() {
            fs::remove_file(&self.file_path)
                .map_err(|e| AppError::FileIo(format!("Failed to remove session: {}", e)))?;
        }
        info!("Session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Session {
        Session {
            token: "tok-123".to_string(),
            user_id: 4,
            email: "leila@bank.tn".to_string(),
            name: "Leila Trabelsi".to_string(),
        }
    }

    #[test]
    fn test_blank_token_is_not_a_credential() {
        assert!(BearerToken::new("   ").is_none());
        let store = SessionStore::in_memory(Some(Session {
            token: String::new(),
            ..sample()
        }));
        assert!(store.current().is_some());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_header_value_and_redacted_debug() {
        let token = BearerToken::new("abc").unwrap();
        assert_eq!(token.header_value(), "Bearer abc");
        assert!(!format!("{:?}", token).contains("abc"));
    }

    #[test]
    fn test_persist_and_restore() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = SessionStore::open(&path).unwrap();
        assert!(store.current().is_none());
        store.begin(sample()).unwrap();
        assert!(path.exists());

        let reopened = SessionStore::open(&path).unwrap();
        assert_eq!(reopened.current(), Some(sample()));
        assert_eq!(reopened.credential().unwrap().as_str(), "tok-123");
    }

    #[test]
    fn test_end_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = SessionStore::open(&path).unwrap();
        store.begin(sample()).unwrap();

        store.end().unwrap();
        assert!(store.current().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file_starts_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = SessionStore::open(&path).unwrap();
        assert!(store.current().is_none());
    }
}
