//! View-level error types.

use jobboard_models::job::JobTypeParseError;
use jobboard_models::{ApplicationStatus, JobStatus, ValidationError};
use thiserror::Error;

pub type ViewResult<T> = Result<T, ViewError>;

/// Errors raised by a view before any request is sent.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Salary must be a number: {0:?}")]
    InvalidSalary(String),

    #[error(transparent)]
    InvalidJobType(#[from] JobTypeParseError),

    #[error("{0}")]
    InvalidField(String),

    #[error("This job is not accepting applications ({0})")]
    NotAccepting(JobStatus),

    #[error("Cannot move an application from {from} to {to}")]
    TransitionNotAllowed {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    #[error("Only pending applications can be withdrawn")]
    NotWithdrawable,

    #[error("Failed to read resume {path}: {source}")]
    Resume {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
