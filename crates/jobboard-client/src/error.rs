//! API client error types.

use jobboard_models::GENERIC_FAILURE_MESSAGE;
use thiserror::Error;

/// Result type for API client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the API.
///
/// HTTP variants carry the server-provided message, which may be empty.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Server error ({0}): {1}")]
    ServerError(u16, String),

    #[error("Unexpected status {0}: {1}")]
    UnexpectedStatus(u16, String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Map a non-2xx status to an error.
    pub fn from_http_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 | 422 => Self::BadRequest(message),
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            500..=599 => Self::ServerError(status, message),
            _ => Self::UnexpectedStatus(status, message),
        }
    }

    /// HTTP status of the failed response, if one was received.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::Unauthorized(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Conflict(_) => Some(409),
            Self::ServerError(status, _) | Self::UnexpectedStatus(status, _) => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::Json(_) | Self::Config(_) => None,
        }
    }

    /// Text to show next to the control that triggered the call: the server
    /// message when there is one, otherwise a generic fallback.
    pub fn user_message(&self) -> String {
        let server_message = match self {
            Self::BadRequest(m)
            | Self::Unauthorized(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::Conflict(m)
            | Self::ServerError(_, m)
            | Self::UnexpectedStatus(_, m) => Some(m.as_str()),
            Self::Network(_) | Self::Json(_) | Self::Config(_) => None,
        };

        server_message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(GENERIC_FAILURE_MESSAGE)
            .to_string()
    }
}
