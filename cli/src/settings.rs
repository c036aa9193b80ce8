use std::path::PathBuf;

use persistence::DEFAULT_SESSION_FILE;
use portal_api::DEFAULT_BASE_URL;

pub const API_URL_VAR: &str = "PORTAL_API_URL";
pub const SESSION_FILE_VAR: &str = "PORTAL_SESSION_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub session_file: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: lookup(API_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
            session_file: lookup(SESSION_FILE_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE)),
        }
    }

    /// Command line flags win over the environment
    pub fn with_overrides(mut self, api_url: Option<String>, session_file: Option<PathBuf>) -> Self {
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        if let Some(session_file) = session_file {
            self.session_file = session_file;
        }
        self
    }
}
