//! Where the user ends up after a navigation or a sign-in.

use jobboard_models::Session;
use jobboard_session::{landing_path, AuthResult, GuardDecision, RouteGuard, OAUTH_FAILURE_PATH};
use tracing::debug;

/// Screen reached after post-login redirects.
pub fn after_login(session: &Session) -> &'static str {
    landing_path(session.role())
}

/// Screen reached after the OAuth callback page.
pub fn after_oauth(result: &AuthResult<Session>) -> &'static str {
    match result {
        Ok(session) => after_login(session),
        Err(_) => OAUTH_FAILURE_PATH,
    }
}

/// Result of opening a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub requested: String,
    /// Screen actually shown.
    pub path: String,
}

impl Navigation {
    pub fn redirected(&self) -> bool {
        self.requested != self.path
    }
}

/// Open `path`, following guard redirects once restoration is done.
pub async fn open(guard: &RouteGuard, path: &str) -> Navigation {
    let mut current = path.to_string();
    // Redirect targets are public, so one hop settles it; the bound guards
    // against a table edit that breaks that.
    for _ in 0..4 {
        match guard.check_when_ready(&current).await {
            GuardDecision::Allowed | GuardDecision::Pending => break,
            GuardDecision::Denied { redirect } => {
                debug!(from = %current, to = %redirect, "Redirecting");
                current = redirect.to_string();
            }
        }
    }
    Navigation {
        requested: path.to_string(),
        path: current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_models::{Role, UserId, UserSummary};
    use jobboard_session::AuthError;

    fn session(role: Role) -> Session {
        Session::new(
            "t",
            UserSummary {
                id: UserId(1),
                email: "a@example.com".into(),
                first_name: String::new(),
                last_name: String::new(),
                role,
            },
        )
    }

    #[test]
    fn test_after_login_by_role() {
        assert_eq!(after_login(&session(Role::Admin)), "/admin/dashboard");
        assert_eq!(after_login(&session(Role::Recruiter)), "/recruiter/dashboard");
        assert_eq!(after_login(&session(Role::Seeker)), "/seeker/dashboard");
    }

    #[test]
    fn test_after_oauth_failure() {
        let failed: AuthResult<Session> = Err(AuthError::oauth("missing token"));
        assert_eq!(after_oauth(&failed), "/login?error=oauth_failed");
        assert_eq!(after_oauth(&Ok(session(Role::Seeker))), "/seeker/dashboard");
    }
}
