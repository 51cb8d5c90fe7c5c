//! Admin dashboard: overview panels and the user management table.

use jobboard_client::AdminService;
use jobboard_models::{AdminStats, ApiResponse, Application, Job, Role, UserAccount, UserId};
use tracing::info;

use super::page::{ListState, PageView};

/// Which users the table shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UserFilter {
    #[default]
    All,
    Role(Role),
    Search { term: String, role: Option<Role> },
}

impl UserFilter {
    /// Build a filter from the search box and role dropdown.
    pub fn from_inputs(term: Option<&str>, role: Option<Role>) -> Self {
        match term.map(str::trim).filter(|t| !t.is_empty()) {
            Some(term) => Self::Search {
                term: term.to_string(),
                role,
            },
            None => role.map(Self::Role).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Activate,
    Deactivate,
    Delete,
}

impl UserAction {
    /// Toggle offered next to a user row.
    pub fn toggle_for(user: &UserAccount) -> Self {
        if user.is_active {
            Self::Deactivate
        } else {
            Self::Activate
        }
    }
}

/// The user management table.
///
/// Every action is followed by a reload of the current page so the table
/// always reflects the server.
pub struct AdminUsersView {
    service: AdminService,
    filter: UserFilter,
    list: PageView<UserAccount>,
    notice: Option<String>,
}

impl AdminUsersView {
    pub fn new(service: AdminService, page_size: u32) -> Self {
        Self {
            service,
            filter: UserFilter::All,
            list: PageView::new(page_size, "No users found"),
            notice: None,
        }
    }

    pub fn filter(&self) -> &UserFilter {
        &self.filter
    }

    pub fn list(&self) -> &PageView<UserAccount> {
        &self.list
    }

    pub fn users(&self) -> &[UserAccount] {
        self.list.items()
    }

    pub fn user(&self, id: UserId) -> Option<&UserAccount> {
        self.users().iter().find(|u| u.id == id)
    }

    /// Outcome message of the last action.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub async fn set_filter(&mut self, filter: UserFilter) {
        self.set_filter_at(filter, 0).await;
    }

    pub async fn set_filter_at(&mut self, filter: UserFilter, page: u32) {
        self.filter = filter;
        self.list.go_to(page);
        self.reload().await;
    }

    pub async fn reload(&mut self) {
        let service = self.service.clone();
        let filter = self.filter.clone();
        self.list
            .load(|page| async move {
                match filter {
                    UserFilter::All => service.list_users(page).await,
                    UserFilter::Role(role) => service.users_by_role(role, page).await,
                    UserFilter::Search { term, role } => {
                        service.search_users(&term, role, page).await
                    }
                }
            })
            .await;
    }

    /// Run an action and reload. Returns whether the action succeeded.
    pub async fn act(&mut self, id: UserId, action: UserAction) -> bool {
        let response = match action {
            UserAction::Activate => self.service.activate_user(id).await,
            UserAction::Deactivate => self.service.deactivate_user(id).await,
            UserAction::Delete => self.service.delete_user(id).await,
        };

        if response.success {
            info!(user_id = %id, ?action, "Admin action applied");
            self.notice = response.message;
            self.reload().await;
            true
        } else {
            self.notice = Some(response.error_message().to_string());
            false
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.list.state(), ListState::Empty)
    }
}

/// Dashboard panels loaded together.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminOverview {
    pub stats: ApiResponse<AdminStats>,
    pub recent_jobs: ApiResponse<Vec<Job>>,
    pub recent_applications: ApiResponse<Vec<Application>>,
    pub pending_recruiters: ApiResponse<Vec<UserAccount>>,
}

impl AdminOverview {
    /// Each panel fails independently.
    pub async fn load(service: &AdminService) -> Self {
        let (stats, recent_jobs, recent_applications, pending_recruiters) = tokio::join!(
            service.stats(),
            service.recent_jobs(),
            service.recent_applications(),
            service.pending_recruiters(),
        );
        Self {
            stats,
            recent_jobs,
            recent_applications,
            pending_recruiters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_inputs() {
        assert_eq!(UserFilter::from_inputs(None, None), UserFilter::All);
        assert_eq!(
            UserFilter::from_inputs(Some("  "), Some(Role::Admin)),
            UserFilter::Role(Role::Admin)
        );
        assert_eq!(
            UserFilter::from_inputs(Some(" kim "), None),
            UserFilter::Search {
                term: "kim".into(),
                role: None
            }
        );
    }
}
