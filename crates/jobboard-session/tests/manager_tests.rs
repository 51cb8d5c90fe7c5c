//! Auth manager flows against a mock API server.

use std::sync::Arc;

use jobboard_client::{ApiClient, AuthApi, ClientConfig, JobService, PageRequest};
use jobboard_models::{LoginRequest, RegisterForm, ResetPasswordRequest, Role, ValidationError};
use jobboard_session::{
    AuthError, AuthManager, AuthState, FileStorage, GuardDecision, LoginOutcome, MemoryStorage,
    RouteGuard, SessionStorage, SessionStore,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    manager: AuthManager,
    store: Arc<SessionStore>,
    client: ApiClient,
}

fn harness(server: &MockServer, storage: Arc<dyn SessionStorage>) -> Harness {
    let store = Arc::new(SessionStore::new(storage));
    let config = ClientConfig::with_base_url(format!("{}/api", server.uri()));
    let client = ApiClient::new(config, store.clone()).unwrap();
    let manager = AuthManager::new(AuthApi::new(client.clone()), store.clone());
    manager.restore_session();
    Harness {
        manager,
        store,
        client,
    }
}

fn auth_body(token: Option<&str>, role: &str) -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "token": token,
            "type": "Bearer",
            "id": 21,
            "email": "lee@example.com",
            "firstName": "Lee",
            "lastName": "Chan",
            "role": role,
            "requires2FA": false,
            "requiresApproval": false
        }
    })
}

fn register_form(role: Role) -> RegisterForm {
    RegisterForm {
        first_name: "Lee".into(),
        last_name: "Chan".into(),
        email: "lee@example.com".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
        role,
    }
}

#[tokio::test]
async fn test_two_factor_login_persists_nothing_until_verified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "OTP sent to your email",
            "data": {"id": 21, "email": "lee@example.com", "requires2FA": true}
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/verify-otp"))
        .and(body_json(json!({"email": "lee@example.com", "otpCode": "123456"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(auth_body(Some("jwt-2fa"), "SEEKER")),
        )
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    let h = harness(&server, storage.clone());

    let outcome = h
        .manager
        .login(LoginRequest::new("lee@example.com", "secret1"))
        .await
        .unwrap();
    let challenge = match outcome {
        LoginOutcome::TwoFactorRequired(challenge) => challenge,
        other => panic!("expected a challenge, got {:?}", other),
    };
    assert!(!h.store.is_authenticated());
    assert_eq!(storage.get("token").unwrap(), None);
    assert_eq!(storage.get("user").unwrap(), None);

    let session = h.manager.verify_otp(&challenge, "123456").await.unwrap();
    assert_eq!(session.token, "jwt-2fa");
    assert!(h.manager.has_role(Role::Seeker));
    assert_eq!(storage.get("token").unwrap().as_deref(), Some("jwt-2fa"));
}

#[tokio::test]
async fn test_register_round_trips_through_reload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(auth_body(Some("jwt-new"), "SEEKER")),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("session.json");
    let h = harness(&server, Arc::new(FileStorage::new(&file)));

    let session = h.manager.register(register_form(Role::Seeker)).await.unwrap();
    assert_eq!(session.role(), Role::Seeker);

    let reloaded = SessionStore::new(Arc::new(FileStorage::new(&file)));
    assert_eq!(reloaded.get(), AuthState::Restoring);
    let restored = AuthManager::new(AuthApi::new(h.client.clone()), Arc::new(reloaded));
    assert_eq!(restored.restore_session(), Some(session));
}

#[tokio::test]
async fn test_recruiter_registration_awaits_approval() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "Registration successful. Awaiting admin approval.",
            "data": {
                "id": 30,
                "email": "lee@example.com",
                "role": "RECRUITER",
                "requiresApproval": true
            }
        })))
        .mount(&server)
        .await;

    let h = harness(&server, Arc::new(MemoryStorage::new()));
    let err = h.manager.register(register_form(Role::Recruiter)).await.unwrap_err();
    assert!(matches!(err, AuthError::ApprovalPending));
    assert!(!h.store.is_authenticated());
}

#[tokio::test]
async fn test_register_mismatch_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let h = harness(&server, Arc::new(MemoryStorage::new()));
    let mut form = register_form(Role::Seeker);
    form.confirm_password = "other12".into();

    let err = h.manager.register(form).await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(ValidationError::PasswordMismatch)));
}

#[tokio::test]
async fn test_failed_login_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Invalid email or password"
        })))
        .mount(&server)
        .await;

    let h = harness(&server, Arc::new(MemoryStorage::new()));
    let err = h
        .manager
        .login(LoginRequest::new("lee@example.com", "wrong12"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid email or password");
    assert_eq!(h.store.get(), AuthState::Anonymous);
}

#[tokio::test]
async fn test_unknown_role_establishes_no_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_body(Some("jwt"), "SUPERUSER")))
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    let h = harness(&server, storage.clone());
    let err = h
        .manager
        .login(LoginRequest::new("lee@example.com", "secret1"))
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::UnrecognizedRole(role) if role == "SUPERUSER"));
    assert!(!h.store.is_authenticated());
    assert_eq!(storage.get("token").unwrap(), None);
    let guard = RouteGuard::new(h.store.clone());
    assert!(guard.check("/jobs").is_allowed());
    assert!(!guard.check("/profile").is_allowed());
}

#[tokio::test]
async fn test_session_token_attached_and_logout_clears() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(auth_body(Some("jwt-r"), "RECRUITER")),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/jobs/my-jobs"))
        .and(header("Authorization", "Bearer jwt-r"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"content": [], "totalPages": 0, "currentPage": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Arc::new(MemoryStorage::new()));
    h.manager
        .login(LoginRequest::new("lee@example.com", "secret1"))
        .await
        .unwrap();

    let jobs = JobService::new(h.client.clone());
    assert!(jobs.my_jobs(PageRequest::first(10)).await.success);

    h.manager.logout();
    assert!(!h.manager.is_authenticated());
    assert_eq!(h.manager.restore_session(), None);
}

#[tokio::test]
async fn test_oauth_callback_matches_login_contract() {
    let server = MockServer::start().await;
    let storage = Arc::new(MemoryStorage::new());
    let h = harness(&server, storage.clone());

    let session = h
        .manager
        .complete_oauth_callback(concat!(
            "/oauth/callback?token=oauth-jwt&id=21&email=lee%40example.com",
            "&firstName=Lee&lastName=Chan&role=ADMIN"
        ))
        .unwrap();
    assert_eq!(session.role(), Role::Admin);
    assert!(h.manager.has_role(Role::Admin));
    assert_eq!(storage.get("token").unwrap().as_deref(), Some("oauth-jwt"));

    let reloaded = AuthManager::new(
        AuthApi::new(h.client.clone()),
        Arc::new(SessionStore::new(storage)),
    );
    assert_eq!(reloaded.restore_session(), Some(session));

    let guard = RouteGuard::new(h.store.clone());
    assert_eq!(guard.check_when_ready("/admin/dashboard").await, GuardDecision::Allowed);
    assert_eq!(
        guard.check("/seeker/dashboard"),
        GuardDecision::Denied { redirect: "/" }
    );
}

#[tokio::test]
async fn test_bad_oauth_callback_keeps_current_state() {
    let server = MockServer::start().await;
    let h = harness(&server, Arc::new(MemoryStorage::new()));

    let err = h
        .manager
        .complete_oauth_callback("/oauth/callback?token=t&id=1&email=a%40b.com&role=OWNER")
        .unwrap_err();
    assert!(matches!(err, AuthError::UnrecognizedRole(_)));
    assert_eq!(h.store.get(), AuthState::Anonymous);
}

#[tokio::test]
async fn test_reset_password_validates_before_dispatch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/reset-password"))
        .and(body_json(json!({
            "token": "reset-tok",
            "newPassword": "newpass1",
            "confirmPassword": "newpass1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Password reset successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server, Arc::new(MemoryStorage::new()));
    let short = ResetPasswordRequest {
        token: "reset-tok".into(),
        new_password: "abc".into(),
        confirm_password: "abc".into(),
    };
    assert!(h.manager.reset_password(short).await.unwrap_err().is_validation());

    let ok = ResetPasswordRequest {
        token: "reset-tok".into(),
        new_password: "newpass1".into(),
        confirm_password: "newpass1".into(),
    };
    assert_eq!(
        h.manager.reset_password(ok).await.unwrap().as_deref(),
        Some("Password reset successfully")
    );
}

#[tokio::test]
async fn test_guard_waits_for_restoration() {
    let store = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
    let guard = RouteGuard::new(store.clone());
    assert_eq!(guard.check("/profile"), GuardDecision::Pending);

    let waiting = {
        let store = store.clone();
        tokio::spawn(async move { RouteGuard::new(store).check_when_ready("/profile").await })
    };
    tokio::task::yield_now().await;

    let client = ApiClient::anonymous(ClientConfig::default()).unwrap();
    let manager = AuthManager::new(AuthApi::new(client), store);
    assert_eq!(manager.restore_session(), None);

    assert_eq!(
        waiting.await.unwrap(),
        GuardDecision::Denied { redirect: "/login" }
    );
}
