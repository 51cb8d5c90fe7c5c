//! Client configuration.

use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Default API root when `JOBBOARD_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default number of items requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Items per page for list calls
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// Config pointing at the given API root with default timeouts.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            ..Self::default()
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        let base_url =
            std::env::var("JOBBOARD_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let base_url = normalize_base_url(&base_url);
        if base_url.is_empty() {
            return Err(ClientError::Config("JOBBOARD_API_URL cannot be empty".to_string()));
        }

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(env_parse("JOBBOARD_TIMEOUT_SECS", 30)),
            connect_timeout: Duration::from_secs(env_parse("JOBBOARD_CONNECT_TIMEOUT_SECS", 5)),
            page_size: env_parse("JOBBOARD_PAGE_SIZE", DEFAULT_PAGE_SIZE).max(1),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
