//! Application lists for recruiters and seekers.

use jobboard_client::ApplicationService;
use jobboard_models::{ApiResponse, Application, ApplicationStatus};

use crate::error::{ViewError, ViewResult};

/// Review buttons shown to the recruiter for one application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewControls {
    pub mark_reviewed: bool,
    pub accept: bool,
    pub reject: bool,
}

impl ReviewControls {
    pub fn for_status(status: ApplicationStatus) -> Self {
        Self {
            mark_reviewed: status.can_transition_to(ApplicationStatus::Reviewed),
            accept: status.can_transition_to(ApplicationStatus::Accepted),
            reject: status.can_transition_to(ApplicationStatus::Rejected),
        }
    }

    pub fn any(&self) -> bool {
        self.mark_reviewed || self.accept || self.reject
    }
}

/// Only pending applications can be withdrawn by the seeker.
pub fn can_withdraw(status: ApplicationStatus) -> bool {
    status == ApplicationStatus::Pending
}

pub fn status_label(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Pending => "Pending",
        ApplicationStatus::Reviewed => "Under Review",
        ApplicationStatus::Accepted => "Accepted",
        ApplicationStatus::Rejected => "Rejected",
    }
}

/// Move an application to `next`, refusing transitions the controls hide.
pub async fn review(
    service: &ApplicationService,
    application: &Application,
    next: ApplicationStatus,
    notes: Option<&str>,
) -> ViewResult<ApiResponse<Application>> {
    if !application.status.can_transition_to(next) {
        return Err(ViewError::TransitionNotAllowed {
            from: application.status,
            to: next,
        });
    }
    Ok(service.update_status(application.id, next, notes).await)
}

pub async fn withdraw(
    service: &ApplicationService,
    application: &Application,
) -> ViewResult<ApiResponse<()>> {
    if !can_withdraw(application.status) {
        return Err(ViewError::NotWithdrawable);
    }
    Ok(service.withdraw(application.id).await)
}
