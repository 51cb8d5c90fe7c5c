//! The job posting form.

use jobboard_models::{JobRequest, JobStatus, JobType};

use crate::error::{ViewError, ViewResult};

/// Raw text inputs of the post/edit job form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobForm {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub job_type: String,
    pub status: Option<String>,
    pub requirements: String,
    pub benefits: String,
}

impl JobForm {
    pub fn into_request(self) -> ViewResult<JobRequest> {
        let salary = match self.salary.trim() {
            "" => None,
            raw => Some(
                raw.replace([',', '$'], "")
                    .parse::<f64>()
                    .map_err(|_| ViewError::InvalidSalary(raw.to_string()))?,
            ),
        };
        let job_type: JobType = self.job_type.parse()?;
        let status = match self.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(
                raw.parse::<JobStatus>()
                    .map_err(|e| ViewError::InvalidField(e.to_string()))?,
            ),
            None => None,
        };

        let request = JobRequest {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            company: self.company.trim().to_string(),
            location: self.location.trim().to_string(),
            salary,
            job_type,
            status,
            requirements: optional(self.requirements),
            benefits: optional(self.benefits),
        };
        request.validate()?;
        Ok(request)
    }
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_models::ValidationError;

    fn form() -> JobForm {
        JobForm {
            title: " Platform Engineer ".into(),
            description: "Own deployment and keep our services fast and reliable.".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            salary: "$95,000".into(),
            job_type: "full-time".into(),
            status: None,
            requirements: "".into(),
            benefits: "Equity".into(),
        }
    }

    #[test]
    fn test_job_form_into_request() {
        let request = form().into_request().unwrap();
        assert_eq!(request.title, "Platform Engineer");
        assert_eq!(request.salary, Some(95_000.0));
        assert_eq!(request.job_type, JobType::FullTime);
        assert!(request.requirements.is_none());
        assert_eq!(request.benefits.as_deref(), Some("Equity"));
    }

    #[test]
    fn test_job_form_rejects_bad_input() {
        let mut bad_salary = form();
        bad_salary.salary = "lots".into();
        assert!(matches!(bad_salary.into_request(), Err(ViewError::InvalidSalary(_))));

        let mut short = form();
        short.description = "Too short".into();
        assert!(matches!(
            short.into_request(),
            Err(ViewError::Validation(ValidationError::Length { .. }))
        ));

        let mut negative = form();
        negative.salary = "-5".into();
        assert!(matches!(
            negative.into_request(),
            Err(ViewError::Validation(ValidationError::NotPositive { .. }))
        ));
    }
}
