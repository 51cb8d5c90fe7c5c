//! Route table and route guard.
//!
//! Each screen declares its access at registration: public, or signed in with
//! one of a set of roles. An empty role set means any signed-in user.

use std::sync::Arc;

use jobboard_models::Role;
use tracing::debug;

use crate::store::{AuthState, SessionStore};

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const OAUTH_FAILURE_PATH: &str = "/login?error=oauth_failed";

/// Who may open a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Signed in with any of the roles; empty means any role.
    SignedIn(&'static [Role]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDef {
    /// Path pattern; `:name` segments match any single segment.
    pub pattern: &'static str,
    pub access: Access,
}

const fn public(pattern: &'static str) -> RouteDef {
    RouteDef {
        pattern,
        access: Access::Public,
    }
}

const fn signed_in(pattern: &'static str, roles: &'static [Role]) -> RouteDef {
    RouteDef {
        pattern,
        access: Access::SignedIn(roles),
    }
}

pub const ROUTES: &[RouteDef] = &[
    public("/"),
    public("/login"),
    public("/register"),
    public("/jobs"),
    public("/jobs/:jobId"),
    public("/forgot-password"),
    public("/reset-password"),
    public("/oauth/callback"),
    signed_in("/profile", &[]),
    signed_in("/seeker/dashboard", &[Role::Seeker]),
    signed_in("/recruiter/dashboard", &[Role::Recruiter]),
    signed_in("/recruiter/post-job", &[Role::Recruiter]),
    signed_in("/recruiter/jobs/:jobId/applications", &[Role::Recruiter]),
    signed_in("/admin/dashboard", &[Role::Admin]),
];

/// A resolved path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub route: &'static RouteDef,
    pub params: Vec<(&'static str, String)>,
}

impl RouteMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl RouteDef {
    /// Match a path (query string ignored) against this route.
    pub fn matches(&'static self, path: &str) -> Option<RouteMatch> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut actual = path.split('/').filter(|s| !s.is_empty());
        let mut params = Vec::new();

        for expected in self.pattern.split('/').filter(|s| !s.is_empty()) {
            let segment = actual.next()?;
            match expected.strip_prefix(':') {
                Some(name) => params.push((name, segment.to_string())),
                None if expected == segment => {}
                None => return None,
            }
        }
        if actual.next().is_some() {
            return None;
        }

        Some(RouteMatch {
            route: self,
            params,
        })
    }
}

pub fn resolve(path: &str) -> Option<RouteMatch> {
    ROUTES.iter().find_map(|route| route.matches(path))
}

/// Outcome of one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session restoration has not finished; render nothing yet.
    Pending,
    Denied { redirect: &'static str },
    Allowed,
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Decide access for one screen against a session state.
pub fn decide(state: &AuthState, access: Access) -> GuardDecision {
    let roles = match access {
        Access::Public => return GuardDecision::Allowed,
        Access::SignedIn(roles) => roles,
    };

    match state {
        AuthState::Restoring => GuardDecision::Pending,
        AuthState::Anonymous => GuardDecision::Denied {
            redirect: LOGIN_PATH,
        },
        AuthState::Authenticated(session) => {
            if roles.is_empty() || roles.iter().any(|role| session.has_role(*role)) {
                GuardDecision::Allowed
            } else {
                GuardDecision::Denied {
                    redirect: HOME_PATH,
                }
            }
        }
    }
}

/// Screen a user lands on after signing in.
pub fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin/dashboard",
        Role::Recruiter => "/recruiter/dashboard",
        Role::Seeker => "/seeker/dashboard",
    }
}

pub struct RouteGuard {
    store: Arc<SessionStore>,
}

impl RouteGuard {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Evaluate a navigation against the current state.
    ///
    /// Unknown paths redirect home.
    pub fn check(&self, path: &str) -> GuardDecision {
        let Some(found) = resolve(path) else {
            debug!(path = %path, "Unknown route");
            return GuardDecision::Denied {
                redirect: HOME_PATH,
            };
        };
        let decision = decide(&self.store.get(), found.route.access);
        debug!(path = %path, ?decision, "Route guard evaluated");
        decision
    }

    /// Like [`RouteGuard::check`], but waits out session restoration so the
    /// answer is never [`GuardDecision::Pending`].
    pub async fn check_when_ready(&self, path: &str) -> GuardDecision {
        let mut rx = self.store.subscribe();
        if let Err(e) = rx.wait_for(AuthState::is_restored).await {
            debug!("Session store closed while waiting: {}", e);
        }
        match self.check(path) {
            GuardDecision::Pending => GuardDecision::Denied {
                redirect: LOGIN_PATH,
            },
            decision => decision,
        }
    }
}
