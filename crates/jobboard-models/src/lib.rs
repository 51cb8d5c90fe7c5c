//! Shared data models for the JobBoard client.
//!
//! This crate provides Serde-serializable types for:
//! - Roles, user summaries and authenticated sessions
//! - Job postings and job applications
//! - Admin-facing user accounts and dashboard statistics
//! - Profiles and two-factor settings
//! - The response envelope and paginated list shape of the remote API
//! - Request DTOs with client-side validation

pub mod account;
pub mod application;
pub mod auth;
pub mod envelope;
pub mod ids;
pub mod job;
pub mod profile;
pub mod role;
pub mod session;
pub mod validation;

// Re-export common types
pub use account::{AdminStats, UserAccount};
pub use application::{Application, ApplicationStatus, ApplicationSubmission, ResumeUpload};
pub use auth::{
    AuthPayload, ForgotPasswordRequest, LoginRequest, OtpVerifyRequest, RegisterForm,
    RegisterRequest, ResetPasswordRequest,
};
pub use envelope::{ApiResponse, Page, GENERIC_FAILURE_MESSAGE};
pub use ids::{ApplicationId, JobId, UserId};
pub use job::{Job, JobRequest, JobStatus, JobType};
pub use profile::{Profile, ProfileUpdate};
pub use role::{Role, RoleParseError};
pub use session::{Session, UserSummary};
pub use validation::ValidationError;
