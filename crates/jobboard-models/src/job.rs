//! Job postings.

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::validation::{self, ValidationError};
use crate::{JobId, UserId};

/// Lifecycle state of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Accepting applications
    #[default]
    Open,
    /// No longer accepting applications
    Closed,
    /// Position has been filled
    Filled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Open => "OPEN",
            JobStatus::Closed => "CLOSED",
            JobStatus::Filled => "FILLED",
        }
    }

    /// Only open postings accept new applications.
    pub fn accepts_applications(&self) -> bool {
        matches!(self, JobStatus::Open)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = JobStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "OPEN" => Ok(JobStatus::Open),
            "CLOSED" => Ok(JobStatus::Closed),
            "FILLED" => Ok(JobStatus::Filled),
            _ => Err(JobStatusParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown job status: {0}")]
pub struct JobStatusParseError(String);

/// Employment type of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Remote,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "FULL_TIME",
            JobType::PartTime => "PART_TIME",
            JobType::Contract => "CONTRACT",
            JobType::Internship => "INTERNSHIP",
            JobType::Remote => "REMOTE",
        }
    }

    /// Human-readable label ("FULL TIME").
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for JobType {
    type Err = JobTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "FULL_TIME" => Ok(JobType::FullTime),
            "PART_TIME" => Ok(JobType::PartTime),
            "CONTRACT" => Ok(JobType::Contract),
            "INTERNSHIP" => Ok(JobType::Internship),
            "REMOTE" => Ok(JobType::Remote),
            _ => Err(JobTypeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown job type: {0}")]
pub struct JobTypeParseError(String);

/// A job posting as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub application_count: u32,
    /// Owning recruiter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter_name: Option<String>,
    pub created_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Body of create/update job calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    pub job_type: JobType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,
}

impl JobRequest {
    pub const TITLE_MIN: usize = 3;
    pub const TITLE_MAX: usize = 100;
    pub const DESCRIPTION_MIN: usize = 50;
    pub const DESCRIPTION_MAX: usize = 5000;

    /// Validate the posting before it is sent.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::length_between(&self.title, "Job title", Self::TITLE_MIN, Self::TITLE_MAX)?;
        validation::length_between(
            &self.description,
            "Job description",
            Self::DESCRIPTION_MIN,
            Self::DESCRIPTION_MAX,
        )?;
        validation::require(&self.company, "Company name")?;
        validation::require(&self.location, "Location")?;
        if let Some(salary) = self.salary {
            if salary.is_nan() || salary <= 0.0 {
                return Err(ValidationError::NotPositive { field: "Salary" });
            }
        }
        Ok(())
    }
}
