use portal_core::models::Session;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;

pub const DEFAULT_SESSION_FILE: &str = ".portal-session.json";

#[derive(Debug, Error)]
pub enum Error {
    #[error("File error: '{0}'")]
    Io(#[from] std::io::Error),
    #[error("Corrupt session file: '{0}'")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Keeps the logged-in session between command invocations
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored session, or None when nobody is logged in
    pub async fn load(&self) -> Result<Option<Session>> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let session = serde_json::from_str(&data)?;
        Ok(Some(session))
    }

    pub async fn save(&self, session: &Session) -> Result<()> {
        let data = serde_json::to_string_pretty(session)?;
        tokio::fs::write(&self.path, data).await?;
        log::debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    /// Returns whether there was a session to remove
    pub async fn clear(&self) -> Result<bool> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                log::debug!("Removed session file {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
