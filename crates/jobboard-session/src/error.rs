//! Auth manager error types.

use jobboard_models::ValidationError;
use thiserror::Error;

use crate::storage::StorageError;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Rejected before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The API answered with a failure; carries the message to display.
    #[error("{0}")]
    Remote(String),

    #[error("Server response is missing {0}")]
    IncompleteResponse(&'static str),

    /// The server named a role outside the known set.
    #[error("Unrecognized role: {0:?}")]
    UnrecognizedRole(String),

    #[error("Your account is pending administrator approval")]
    ApprovalPending,

    #[error("Invalid OAuth callback: {0}")]
    OAuthCallback(String),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AuthError {
    pub fn oauth(msg: impl Into<String>) -> Self {
        Self::OAuthCallback(msg.into())
    }

    /// Whether the error was raised locally without contacting the API.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
