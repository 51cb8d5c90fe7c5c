//! Job card and the apply form behind it.

use std::path::Path;

use jobboard_client::ApplicationService;
use jobboard_models::{
    ApiResponse, Application, ApplicationSubmission, Job, JobStatus, ResumeUpload,
};

use crate::error::{ViewError, ViewResult};

/// What the card offers in place of an apply button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyAction {
    Apply,
    PositionFilled,
    NotAccepting,
}

impl ApplyAction {
    pub fn for_status(status: JobStatus) -> Self {
        match status {
            JobStatus::Open => Self::Apply,
            JobStatus::Filled => Self::PositionFilled,
            JobStatus::Closed => Self::NotAccepting,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Apply => "Apply Now",
            Self::PositionFilled => "✓ Position Filled",
            Self::NotAccepting => "Not Accepting",
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Apply)
    }
}

/// Display model of one posting in a list.
#[derive(Debug, Clone, PartialEq)]
pub struct JobCard {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: String,
    pub salary: Option<String>,
    pub status: JobStatus,
    pub applicants: u32,
    pub posted: String,
    pub action: ApplyAction,
}

impl From<&Job> for JobCard {
    fn from(job: &Job) -> Self {
        Self {
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            job_type: job.job_type.label(),
            salary: job.salary.map(format_salary),
            status: job.status,
            applicants: job.application_count,
            posted: job.created_at.format("%b %-d, %Y").to_string(),
            action: ApplyAction::for_status(job.status),
        }
    }
}

/// "$85,000"; cents are dropped.
pub fn format_salary(amount: f64) -> String {
    let whole = amount.max(0.0).round() as u64;
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${}", grouped)
}

/// Apply form for one job.
#[derive(Debug, Clone)]
pub struct ApplyForm<'a> {
    job: &'a Job,
    cover_letter: Option<String>,
    resume: Option<ResumeUpload>,
}

impl<'a> ApplyForm<'a> {
    /// The form only exists for jobs that accept applications.
    pub fn open(job: &'a Job) -> ViewResult<Self> {
        if !job.status.accepts_applications() {
            return Err(ViewError::NotAccepting(job.status));
        }
        Ok(Self {
            job,
            cover_letter: None,
            resume: None,
        })
    }

    pub fn cover_letter(mut self, text: impl Into<String>) -> Self {
        self.cover_letter = Some(text.into());
        self
    }

    pub fn resume(mut self, resume: ResumeUpload) -> Self {
        self.resume = Some(resume);
        self
    }

    /// Attach a résumé read from disk.
    pub fn resume_file(self, path: &Path) -> ViewResult<Self> {
        let bytes = std::fs::read(path).map_err(|source| ViewError::Resume {
            path: path.display().to_string(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        Ok(self.resume(ResumeUpload::new(filename, bytes)))
    }

    pub fn submission(&self) -> ApplicationSubmission {
        let mut submission = ApplicationSubmission::new(self.job.id);
        if let Some(text) = &self.cover_letter {
            submission = submission.with_cover_letter(text.as_str());
        }
        if let Some(resume) = &self.resume {
            submission = submission.with_resume(resume.clone());
        }
        submission
    }

    pub async fn submit(self, service: &ApplicationService) -> ApiResponse<Application> {
        service.apply(self.submission()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use jobboard_models::{JobId, JobType};

    fn job(status: JobStatus) -> Job {
        Job {
            id: JobId(42),
            title: "Data Engineer".into(),
            company: "Acme".into(),
            location: "Lisbon".into(),
            job_type: JobType::FullTime,
            salary: Some(1_234_567.4),
            description: "Pipelines".into(),
            requirements: None,
            benefits: None,
            status,
            application_count: 4,
            recruiter_id: None,
            recruiter_name: None,
            created_at: NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn test_apply_action_by_status() {
        assert_eq!(ApplyAction::for_status(JobStatus::Open), ApplyAction::Apply);
        assert_eq!(ApplyAction::for_status(JobStatus::Filled).label(), "✓ Position Filled");
        assert_eq!(ApplyAction::for_status(JobStatus::Closed).label(), "Not Accepting");
        assert!(!ApplyAction::for_status(JobStatus::Closed).is_enabled());
    }

    #[test]
    fn test_card_fields() {
        let card = JobCard::from(&job(JobStatus::Open));
        assert_eq!(card.job_type, "FULL TIME");
        assert_eq!(card.salary.as_deref(), Some("$1,234,567"));
        assert_eq!(card.posted, "Mar 5, 2024");
        assert!(card.action.is_enabled());
    }

    #[test]
    fn test_format_salary() {
        assert_eq!(format_salary(0.0), "$0");
        assert_eq!(format_salary(999.0), "$999");
        assert_eq!(format_salary(85_000.0), "$85,000");
    }

    #[test]
    fn test_filled_job_offers_no_apply_form() {
        let filled = job(JobStatus::Filled);
        assert!(matches!(
            ApplyForm::open(&filled),
            Err(ViewError::NotAccepting(JobStatus::Filled))
        ));
        assert_eq!(JobCard::from(&filled).action, ApplyAction::PositionFilled);
    }

    #[test]
    fn test_submission_fields() {
        let open = job(JobStatus::Open);
        let submission = ApplyForm::open(&open)
            .unwrap()
            .cover_letter("Hello")
            .resume(ResumeUpload::new("cv.pdf", vec![1, 2, 3]))
            .submission();
        assert_eq!(submission.job_id, JobId(42));
        assert_eq!(submission.cover_letter.as_deref(), Some("Hello"));
        assert_eq!(submission.resume.unwrap().content_type, "application/pdf");
    }
}
