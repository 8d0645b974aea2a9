//! The signed-in user, persisted between command invocations.
//!
//! Stored as `session.toml` in the data directory. Only the id and display
//! name are kept; the profile is always reloaded from the store.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::users::{User, UserId};

const SESSION_FILE: &str = "session.toml";

/// Identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
}

impl Session {
    pub fn new(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
        }
    }
}

fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE)
}

/// Read the saved session, if any.
pub fn load_session(data_dir: &Path) -> Result<Option<Session>, SessionError> {
    let path = session_path(data_dir);
    if !path.exists() {
        return Ok(None);
    }

    let content =
        std::fs::read_to_string(&path).map_err(|e| SessionError::IoError(e.to_string()))?;
    let session = toml::from_str(&content).map_err(|e| SessionError::ParseError(e.to_string()))?;

    Ok(Some(session))
}

pub fn save_session(data_dir: &Path, session: &Session) -> Result<(), SessionError> {
    std::fs::create_dir_all(data_dir).map_err(|e| SessionError::IoError(e.to_string()))?;

    let content =
        toml::to_string(session).map_err(|e| SessionError::SerializeError(e.to_string()))?;
    std::fs::write(session_path(data_dir), content)
        .map_err(|e| SessionError::IoError(e.to_string()))?;

    tracing::debug!("Saved session for user {}", session.user_id);
    Ok(())
}

/// Forget the saved session. Succeeds when none exists.
pub fn clear_session(data_dir: &Path) -> Result<(), SessionError> {
    match std::fs::remove_file(session_path(data_dir)) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SessionError::IoError(e.to_string())),
    }
}

/// Session file errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
