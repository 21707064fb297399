//! Persisted login session
//!
//! The session is a plain value handed to the API client. It is loaded from
//! and saved to a small JSON file so logins survive restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::errors::ApiError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            username: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Load a session file; a missing file is an anonymous session
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        if !path.exists() {
            debug!("No session file at {}", path.display());
            return Ok(Self::anonymous());
        }
        let raw = std::fs::read_to_string(path)?;
        let session: Session = serde_json::from_str(&raw)?;
        debug!(authenticated = session.is_authenticated(), "Loaded session");
        Ok(session)
    }

    /// Like [`Session::load`], but a corrupt file reads as anonymous so the
    /// user can still log in again or log out
    pub fn load_or_anonymous(path: &Path) -> Result<Self, ApiError> {
        match Self::load(path) {
            Err(ApiError::SessionFormat(e)) => {
                warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                Ok(Self::anonymous())
            }
            other => other,
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ApiError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Session saved to {}", path.display());
        Ok(())
    }

    /// Remove the session file if present
    pub fn clear(path: &Path) -> Result<(), ApiError> {
        if path.exists() {
            std::fs::remove_file(path)?;
            info!("Session cleared");
        }
        Ok(())
    }
}
