//! Session state for the JobBoard client.
//!
//! This crate provides:
//! - Key/value session storage (in-memory or a JSON file)
//! - A single-writer session store readers can subscribe to
//! - The auth manager: login, two-factor, register, logout, OAuth callback
//! - The route table and the guard that gates screens by session and role

pub mod error;
pub mod guard;
pub mod manager;
pub mod oauth;
pub mod storage;
pub mod store;

pub use error::{AuthError, AuthResult};
pub use guard::{
    decide, landing_path, resolve, Access, GuardDecision, RouteDef, RouteGuard, RouteMatch,
    HOME_PATH, LOGIN_PATH, OAUTH_FAILURE_PATH, ROUTES,
};
pub use manager::{AuthManager, LoginOutcome, TwoFactorChallenge};
pub use oauth::OAuthCallback;
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError, StorageResult};
pub use store::{AuthState, SessionStore};
