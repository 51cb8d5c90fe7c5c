//! Administrator endpoints.

use jobboard_models::{
    AdminStats, ApiResponse, Application, Job, Page, Role, UserAccount, UserId,
};

use super::{into_envelope, into_unit_envelope, PageRequest};
use crate::client::ApiClient;

#[derive(Clone)]
pub struct AdminService {
    client: ApiClient,
}

impl AdminService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_users(&self, page: PageRequest) -> ApiResponse<Page<UserAccount>> {
        let op = "list_users";
        into_envelope(op, self.client.get(op, "/admin/users", &page.query()).await)
    }

    pub async fn users_by_role(
        &self,
        role: Role,
        page: PageRequest,
    ) -> ApiResponse<Page<UserAccount>> {
        let op = "users_by_role";
        into_envelope(
            op,
            self.client
                .get(op, &format!("/admin/users/role/{}", role), &page.query())
                .await,
        )
    }

    /// Free-text search, optionally narrowed to a single role.
    pub async fn search_users(
        &self,
        term: &str,
        role: Option<Role>,
        page: PageRequest,
    ) -> ApiResponse<Page<UserAccount>> {
        let op = "search_users";
        let mut query = page.query();
        query.push(("q", term.trim().to_string()));
        if let Some(role) = role {
            query.push(("role", role.as_str().to_string()));
        }
        into_envelope(op, self.client.get(op, "/admin/users/search", &query).await)
    }

    pub async fn activate_user(&self, id: UserId) -> ApiResponse<()> {
        let op = "activate_user";
        into_unit_envelope(
            op,
            self.client.patch(op, &format!("/admin/users/{}/activate", id), &[]).await,
        )
    }

    pub async fn deactivate_user(&self, id: UserId) -> ApiResponse<()> {
        let op = "deactivate_user";
        into_unit_envelope(
            op,
            self.client.patch(op, &format!("/admin/users/{}/deactivate", id), &[]).await,
        )
    }

    pub async fn delete_user(&self, id: UserId) -> ApiResponse<()> {
        let op = "delete_user";
        into_unit_envelope(op, self.client.delete(op, &format!("/admin/users/{}", id)).await)
    }

    pub async fn stats(&self) -> ApiResponse<AdminStats> {
        let op = "admin_stats";
        into_envelope(op, self.client.get(op, "/admin/stats", &[]).await)
    }

    pub async fn recent_jobs(&self) -> ApiResponse<Vec<Job>> {
        let op = "recent_jobs";
        into_envelope(op, self.client.get(op, "/admin/recent-jobs", &[]).await)
    }

    pub async fn recent_applications(&self) -> ApiResponse<Vec<Application>> {
        let op = "recent_applications";
        into_envelope(op, self.client.get(op, "/admin/recent-applications", &[]).await)
    }

    /// Recruiters registered but not yet approved.
    pub async fn pending_recruiters(&self) -> ApiResponse<Vec<UserAccount>> {
        let op = "pending_recruiters";
        into_envelope(op, self.client.get(op, "/admin/recruiters/pending", &[]).await)
    }

    pub async fn approve_recruiter(&self, id: UserId) -> ApiResponse<()> {
        let op = "approve_recruiter";
        into_unit_envelope(
            op,
            self.client
                .patch(op, &format!("/admin/recruiters/{}/approve", id), &[])
                .await,
        )
    }

    pub async fn reject_recruiter(&self, id: UserId) -> ApiResponse<()> {
        let op = "reject_recruiter";
        into_unit_envelope(
            op,
            self.client
                .patch(op, &format!("/admin/recruiters/{}/reject", id), &[])
                .await,
        )
    }
}
