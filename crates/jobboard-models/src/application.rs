//! Job applications.

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::{ApplicationId, JobId, UserId};

/// Review state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    /// Submitted, not yet looked at
    #[default]
    Pending,
    /// Seen by the recruiter
    Reviewed,
    /// Candidate accepted
    Accepted,
    /// Candidate rejected
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Reviewed => "REVIEWED",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }

    /// Check if this is a terminal state (no further transition from the client).
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApplicationStatus::Accepted | ApplicationStatus::Rejected)
    }

    /// Whether a recruiter may move an application from `self` to `next`.
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        !self.is_terminal() && *self != next && next != ApplicationStatus::Pending
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ApplicationStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(ApplicationStatus::Pending),
            "REVIEWED" => Ok(ApplicationStatus::Reviewed),
            "ACCEPTED" => Ok(ApplicationStatus::Accepted),
            "REJECTED" => Ok(ApplicationStatus::Rejected),
            _ => Err(ApplicationStatusParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown application status: {0}")]
pub struct ApplicationStatusParseError(String);

/// An application as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub seeker_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seeker_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seeker_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_filename: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    pub applied_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_notes: Option<String>,
}

/// Résumé file attached to an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let content_type = content_type_for(&filename).to_string();
        Self {
            filename,
            content_type,
            bytes,
        }
    }
}

fn content_type_for(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Payload of an apply call, sent as multipart form data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSubmission {
    pub job_id: JobId,
    pub cover_letter: Option<String>,
    pub resume: Option<ResumeUpload>,
}

impl ApplicationSubmission {
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            cover_letter: None,
            resume: None,
        }
    }

    /// Attach a cover letter; blank text is treated as absent.
    pub fn with_cover_letter(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.cover_letter = if text.trim().is_empty() { None } else { Some(text) };
        self
    }

    pub fn with_resume(mut self, resume: ResumeUpload) -> Self {
        self.resume = Some(resume);
        self
    }
}
