//! Job application endpoints.

use jobboard_models::{
    ApiResponse, Application, ApplicationId, ApplicationStatus, ApplicationSubmission, JobId,
    Page,
};
use reqwest::multipart::{Form, Part};

use super::{into_envelope, into_unit_envelope, PageRequest};
use crate::client::ApiClient;
use crate::error::ClientResult;

#[derive(Clone)]
pub struct ApplicationService {
    client: ApiClient,
}

impl ApplicationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Submit an application as a multipart form (`jobId`, `coverLetter`, `resume`).
    pub async fn apply(&self, submission: ApplicationSubmission) -> ApiResponse<Application> {
        let op = "apply";
        let result = match submission_form(submission) {
            Ok(form) => self.client.post_multipart(op, "/applications", form).await,
            Err(e) => Err(e),
        };
        into_envelope(op, result)
    }

    /// Applications submitted by the signed-in seeker.
    pub async fn my_applications(&self, page: PageRequest) -> ApiResponse<Page<Application>> {
        let op = "my_applications";
        into_envelope(
            op,
            self.client.get(op, "/applications/my-applications", &page.query()).await,
        )
    }

    /// Applications received for one of the recruiter's jobs.
    pub async fn for_job(
        &self,
        job_id: JobId,
        page: PageRequest,
    ) -> ApiResponse<Page<Application>> {
        let op = "job_applications";
        into_envelope(
            op,
            self.client
                .get(op, &format!("/applications/job/{}", job_id), &page.query())
                .await,
        )
    }

    pub async fn update_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
        reviewer_notes: Option<&str>,
    ) -> ApiResponse<Application> {
        let op = "update_application_status";
        let mut query = vec![("status", status.as_str().to_string())];
        if let Some(notes) = reviewer_notes.map(str::trim).filter(|n| !n.is_empty()) {
            query.push(("reviewerNotes", notes.to_string()));
        }
        into_envelope(
            op,
            self.client
                .patch(op, &format!("/applications/{}/status", id), &query)
                .await,
        )
    }

    pub async fn withdraw(&self, id: ApplicationId) -> ApiResponse<()> {
        let op = "withdraw_application";
        into_unit_envelope(op, self.client.delete(op, &format!("/applications/{}", id)).await)
    }
}

fn submission_form(submission: ApplicationSubmission) -> ClientResult<Form> {
    let mut form = Form::new().text("jobId", submission.job_id.to_string());
    if let Some(cover_letter) = submission.cover_letter {
        form = form.text("coverLetter", cover_letter);
    }
    if let Some(resume) = submission.resume {
        let part = Part::bytes(resume.bytes)
            .file_name(resume.filename)
            .mime_str(&resume.content_type)?;
        form = form.part("resume", part);
    }
    Ok(form)
}
