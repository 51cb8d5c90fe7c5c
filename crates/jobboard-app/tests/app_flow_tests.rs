//! End-to-end screen flows against a mock API server.

use std::sync::Arc;

use jobboard_app::navigation;
use jobboard_app::views::{
    AdminUsersView, ApplyAction, ApplyForm, JobCard, ListState, PageView, UserAction, UserFilter,
};
use jobboard_app::{App, ViewError};
use jobboard_client::ClientConfig;
use jobboard_models::{JobId, JobStatus, LoginRequest, Role, UserId};
use jobboard_session::{MemoryStorage, SessionStorage};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_for(server: &MockServer, storage: Arc<dyn SessionStorage>) -> App {
    let config = ClientConfig::with_base_url(format!("{}/api", server.uri()));
    App::with_storage(config, storage).unwrap()
}

async fn mount_login(server: &MockServer, role: &str) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "token": format!("jwt-{}", role.to_lowercase()),
                "type": "Bearer",
                "id": 1,
                "email": "user@example.com",
                "firstName": "Pat",
                "lastName": "Doe",
                "role": role
            }
        })))
        .mount(server)
        .await;
}

fn user_json(active: bool) -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "content": [{
                "id": 7,
                "firstName": "Dana",
                "lastName": "Kim",
                "email": "dana@example.com",
                "role": "SEEKER",
                "isActive": active,
                "createdAt": "2024-01-15T08:00:00"
            }],
            "totalPages": 1,
            "currentPage": 0
        }
    })
}

#[tokio::test]
async fn test_role_landing_and_guarded_navigation() {
    let server = MockServer::start().await;
    mount_login(&server, "RECRUITER").await;
    let app = app_for(&server, Arc::new(MemoryStorage::new()));

    let nav = navigation::open(&app.guard, "/recruiter/post-job").await;
    assert_eq!(nav.path, "/login");

    let outcome = app
        .auth
        .login(LoginRequest::new("user@example.com", "secret1"))
        .await
        .unwrap();
    let session = match outcome {
        jobboard_session::LoginOutcome::Authenticated(session) => session,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(navigation::after_login(&session), "/recruiter/dashboard");

    let nav = navigation::open(&app.guard, "/recruiter/jobs/42/applications").await;
    assert!(!nav.redirected());

    let nav = navigation::open(&app.guard, "/admin/dashboard").await;
    assert_eq!(nav.path, "/");

    let nav = navigation::open(&app.guard, "/profile").await;
    assert_eq!(nav.path, "/profile");

    let nav = navigation::open(&app.guard, "/does/not/exist").await;
    assert_eq!(nav.path, "/");
}

#[tokio::test]
async fn test_session_survives_app_restart() {
    let server = MockServer::start().await;
    mount_login(&server, "SEEKER").await;
    let storage = Arc::new(MemoryStorage::new());

    let first = app_for(&server, storage.clone());
    first
        .auth
        .login(LoginRequest::new("user@example.com", "secret1"))
        .await
        .unwrap();

    let second = app_for(&server, storage);
    assert!(second.auth.has_role(Role::Seeker));
    assert_eq!(second.store.session(), first.store.session());
}

#[tokio::test]
async fn test_filled_job_never_offers_apply() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": 42,
                "title": "QA Lead",
                "company": "Acme",
                "location": "Oslo",
                "jobType": "CONTRACT",
                "description": "Lead the QA guild.",
                "status": "FILLED",
                "applicationCount": 12,
                "createdAt": "2024-02-10T10:00:00"
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/applications"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let app = app_for(&server, Arc::new(MemoryStorage::new()));
    let job = app.jobs.get(JobId::from(42)).await.data.unwrap();
    assert_eq!(job.status, JobStatus::Filled);

    let card = JobCard::from(&job);
    assert_eq!(card.action, ApplyAction::PositionFilled);
    assert!(!card.action.is_enabled());
    assert!(matches!(
        ApplyForm::open(&job),
        Err(ViewError::NotAccepting(JobStatus::Filled))
    ));
}

#[tokio::test]
async fn test_admin_deactivate_then_reactivate() {
    let server = MockServer::start().await;
    mount_login(&server, "ADMIN").await;
    Mock::given(method("PATCH"))
        .and(path("/api/admin/users/7/deactivate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "User deactivated successfully"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(false)))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let app = app_for(&server, Arc::new(MemoryStorage::new()));
    app.auth
        .login(LoginRequest::new("user@example.com", "secret1"))
        .await
        .unwrap();

    let mut view = AdminUsersView::new(app.admin.clone(), 10);
    assert!(view.act(UserId::from(7), UserAction::Deactivate).await);
    assert_eq!(view.notice(), Some("User deactivated successfully"));
    let user = view.user(UserId::from(7)).unwrap();
    assert!(!user.is_active);
    assert_eq!(UserAction::toggle_for(user), UserAction::Activate);

    Mock::given(method("PATCH"))
        .and(path("/api/admin/users/7/activate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "User activated successfully"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(true)))
        .mount(&server)
        .await;

    assert!(view.act(UserId::from(7), UserAction::Activate).await);
    assert!(view.user(UserId::from(7)).unwrap().is_active);
}

#[tokio::test]
async fn test_failed_admin_action_keeps_table() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/admin/users/9"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "message": "Access denied"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users/role/RECRUITER"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"content": [], "totalPages": 0, "currentPage": 0}
        })))
        .mount(&server)
        .await;

    let app = app_for(&server, Arc::new(MemoryStorage::new()));
    let mut view = AdminUsersView::new(app.admin.clone(), 10);
    view.set_filter(UserFilter::Role(Role::Recruiter)).await;
    assert!(view.is_empty());

    assert!(!view.act(UserId::from(9), UserAction::Delete).await);
    assert_eq!(view.notice(), Some("Access denied"));
    assert!(view.is_empty());
}

#[tokio::test]
async fn test_response_after_dismissal_is_ignored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/open"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_millis(300))
                .set_body_json(json!({
                    "success": true,
                    "data": {"content": [], "totalPages": 0, "currentPage": 0}
                })),
        )
        .mount(&server)
        .await;

    let app = app_for(&server, Arc::new(MemoryStorage::new()));
    let jobs = app.jobs.clone();
    let mut view = PageView::new(10, "No jobs found");
    let dismiss = view.dismiss_handle();

    let load = tokio::spawn(async move {
        let applied = view.load(|page| async move { jobs.list_open(page).await }).await;
        (applied, view)
    });

    // Dismiss while the server is still holding the response.
    while server.received_requests().await.unwrap_or_default().is_empty() {
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }
    assert!(!load.is_finished());
    dismiss.dismiss();

    let (applied, view) = load.await.unwrap();
    assert!(!applied);
    assert!(view.is_dismissed());
    assert_eq!(view.state(), &ListState::Loading);
}
