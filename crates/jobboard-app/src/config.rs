//! Front-end configuration.

use std::path::PathBuf;

use jobboard_client::{ClientConfig, ClientResult};

/// Session file used when `JOBBOARD_SESSION_FILE` is unset, relative to home.
const DEFAULT_SESSION_FILE: &str = ".jobboard/session.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API client settings
    pub client: ClientConfig,
    /// Where the session token and user are persisted
    pub session_file: PathBuf,
}

impl AppConfig {
    /// Create config from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        let session_file = std::env::var("JOBBOARD_SESSION_FILE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_session_file);

        Ok(Self {
            client: ClientConfig::from_env()?,
            session_file,
        })
    }
}

fn default_session_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_SESSION_FILE)
}
