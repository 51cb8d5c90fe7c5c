//! Job listing endpoints.

use jobboard_models::{ApiResponse, Job, JobId, JobRequest, JobStatus, Page};

use super::{into_envelope, into_unit_envelope, PageRequest};
use crate::client::ApiClient;

#[derive(Clone)]
pub struct JobService {
    client: ApiClient,
}

impl JobService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Every job regardless of status.
    pub async fn list_all(&self, page: PageRequest) -> ApiResponse<Page<Job>> {
        let op = "list_jobs";
        into_envelope(op, self.client.get(op, "/jobs", &page.query()).await)
    }

    /// Jobs currently accepting applications.
    pub async fn list_open(&self, page: PageRequest) -> ApiResponse<Page<Job>> {
        let op = "list_open_jobs";
        into_envelope(op, self.client.get(op, "/jobs/open", &page.query()).await)
    }

    pub async fn search(&self, keyword: &str, page: PageRequest) -> ApiResponse<Page<Job>> {
        let op = "search_jobs";
        let mut query = page.query();
        query.push(("keyword", keyword.trim().to_string()));
        into_envelope(op, self.client.get(op, "/jobs/search", &query).await)
    }

    pub async fn get(&self, id: JobId) -> ApiResponse<Job> {
        let op = "get_job";
        into_envelope(op, self.client.get(op, &format!("/jobs/{}", id), &[]).await)
    }

    pub async fn create(&self, request: &JobRequest) -> ApiResponse<Job> {
        let op = "create_job";
        into_envelope(op, self.client.post_json(op, "/jobs", request).await)
    }

    /// Jobs posted by the signed-in recruiter.
    pub async fn my_jobs(&self, page: PageRequest) -> ApiResponse<Page<Job>> {
        let op = "my_jobs";
        into_envelope(op, self.client.get(op, "/jobs/my-jobs", &page.query()).await)
    }

    pub async fn update(&self, id: JobId, request: &JobRequest) -> ApiResponse<Job> {
        let op = "update_job";
        into_envelope(op, self.client.put_json(op, &format!("/jobs/{}", id), request).await)
    }

    pub async fn update_status(&self, id: JobId, status: JobStatus) -> ApiResponse<Job> {
        let op = "update_job_status";
        let query = [("status", status.as_str().to_string())];
        into_envelope(
            op,
            self.client.patch(op, &format!("/jobs/{}/status", id), &query).await,
        )
    }

    pub async fn delete(&self, id: JobId) -> ApiResponse<()> {
        let op = "delete_job";
        into_unit_envelope(op, self.client.delete(op, &format!("/jobs/{}", id)).await)
    }
}
