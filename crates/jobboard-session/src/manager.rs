//! Auth/session manager.
//!
//! The only writer of the [`SessionStore`]. Login, two-factor verification,
//! registration and the OAuth callback all end in the same establish step, so
//! every entry point persists and activates a session identically.

use std::sync::Arc;

use jobboard_client::AuthApi;
use jobboard_models::{
    ApiResponse, AuthPayload, ForgotPasswordRequest, LoginRequest, OtpVerifyRequest,
    RegisterForm, ResetPasswordRequest, Role, Session,
};
use tracing::{info, warn};

use crate::error::{AuthError, AuthResult};
use crate::oauth::OAuthCallback;
use crate::store::SessionStore;

/// Result of a password login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated(Session),
    /// A one-time code was sent; finish with [`AuthManager::verify_otp`].
    TwoFactorRequired(TwoFactorChallenge),
}

/// Pending second factor for a login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoFactorChallenge {
    pub email: String,
}

pub struct AuthManager {
    api: AuthApi,
    store: Arc<SessionStore>,
}

impl AuthManager {
    pub fn new(api: AuthApi, store: Arc<SessionStore>) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub async fn login(&self, credentials: LoginRequest) -> AuthResult<LoginOutcome> {
        credentials.validate()?;
        let payload = remote(self.api.login(&credentials).await)?;

        if payload.requires_two_factor {
            info!("Login requires a one-time code");
            let email = if payload.email.trim().is_empty() {
                credentials.email
            } else {
                payload.email
            };
            return Ok(LoginOutcome::TwoFactorRequired(TwoFactorChallenge { email }));
        }

        self.establish_from_payload(&payload)
            .map(LoginOutcome::Authenticated)
    }

    pub async fn verify_otp(
        &self,
        challenge: &TwoFactorChallenge,
        code: &str,
    ) -> AuthResult<Session> {
        let request = OtpVerifyRequest::new(challenge.email.as_str(), code);
        request.validate()?;
        let payload = remote(self.api.verify_otp(&request).await)?;
        self.establish_from_payload(&payload)
    }

    /// Create an account and sign in with it.
    ///
    /// Recruiter accounts wait for administrator approval and get no session
    /// until then; that case is reported as [`AuthError::ApprovalPending`].
    pub async fn register(&self, form: RegisterForm) -> AuthResult<Session> {
        let request = form.into_request()?;
        let payload = remote(self.api.register(&request).await)?;

        if payload.requires_approval {
            info!(role = %request.role, "Registration awaiting approval");
            return Err(AuthError::ApprovalPending);
        }

        self.establish_from_payload(&payload)
    }

    /// Never fails; storage errors are logged.
    pub fn logout(&self) {
        self.store.clear();
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.store.has_role(role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    /// Load the persisted session; run once at startup before any guard check.
    pub fn restore_session(&self) -> Option<Session> {
        self.store.restore().session().cloned()
    }

    /// Sign in from the OAuth redirect URL.
    ///
    /// On failure the current session is left untouched.
    pub fn complete_oauth_callback(&self, url: &str) -> AuthResult<Session> {
        let session = OAuthCallback::from_url(url)
            .and_then(OAuthCallback::into_session)
            .inspect_err(|e| warn!("OAuth callback rejected: {}", e))?;
        self.establish(session)
    }

    pub async fn forgot_password(&self, email: &str) -> AuthResult<Option<String>> {
        let request = ForgotPasswordRequest::new(email);
        request.validate()?;
        acknowledged(self.api.forgot_password(&request).await)
    }

    pub async fn reset_password(
        &self,
        request: ResetPasswordRequest,
    ) -> AuthResult<Option<String>> {
        request.validate()?;
        acknowledged(self.api.reset_password(&request).await)
    }

    fn establish_from_payload(&self, payload: &AuthPayload) -> AuthResult<Session> {
        let token = payload
            .token()
            .ok_or(AuthError::IncompleteResponse("token"))?
            .to_string();
        let user = payload.user_summary().map_err(|e| {
            warn!(user_id = %payload.id, "Refusing session with unrecognized role");
            AuthError::UnrecognizedRole(e.0)
        })?;
        self.establish(Session::new(token, user))
    }

    fn establish(&self, session: Session) -> AuthResult<Session> {
        self.store.establish(session.clone())?;
        Ok(session)
    }
}

/// Unwrap the payload of a successful envelope.
fn remote<T>(response: ApiResponse<T>) -> AuthResult<T> {
    if !response.success {
        return Err(AuthError::Remote(response.error_message().to_string()));
    }
    response.data.ok_or(AuthError::IncompleteResponse("data"))
}

/// Success message of a call without payload.
fn acknowledged(response: ApiResponse<()>) -> AuthResult<Option<String>> {
    if response.success {
        Ok(response.message)
    } else {
        Err(AuthError::Remote(response.error_message().to_string()))
    }
}
