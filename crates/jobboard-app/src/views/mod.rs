//! View-models backing each screen.

pub mod admin;
pub mod applications;
pub mod forms;
pub mod job_card;
pub mod page;

pub use admin::{AdminOverview, AdminUsersView, UserAction, UserFilter};
pub use applications::{can_withdraw, ReviewControls};
pub use forms::JobForm;
pub use job_card::{ApplyAction, ApplyForm, JobCard};
pub use page::{DismissHandle, ListState, PageView};
