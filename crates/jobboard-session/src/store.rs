//! The single shared session.
//!
//! Readers call [`SessionStore::get`] or [`SessionStore::subscribe`]. Only the
//! auth manager writes, through the crate-private `establish`, `clear` and
//! `restore`.

use std::sync::Arc;

use jobboard_client::TokenProvider;
use jobboard_models::{Role, Session, UserSummary};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::storage::{SessionStorage, StorageResult, TOKEN_KEY, USER_KEY};

/// Authentication state observed by every screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Persisted state has not been read yet.
    #[default]
    Restoring,
    Anonymous,
    Authenticated(Session),
}

impl AuthState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_restored(&self) -> bool {
        !matches!(self, Self::Restoring)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// False without a session.
    pub fn has_role(&self, role: Role) -> bool {
        self.session().is_some_and(|s| s.has_role(role))
    }
}

pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    state: watch::Sender<AuthState>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        let (state, _) = watch::channel(AuthState::Restoring);
        Self { storage, state }
    }

    pub fn get(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn session(&self) -> Option<Session> {
        self.state.borrow().session().cloned()
    }

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.state.borrow().has_role(role)
    }

    /// Persist `session` and make it the active one.
    ///
    /// Nothing changes in memory if persisting fails, and storage never keeps
    /// the new token next to a previous user.
    pub(crate) fn establish(&self, session: Session) -> StorageResult<()> {
        let user = serde_json::to_string(&session.user)?;
        let previous_token = self.read(TOKEN_KEY);
        self.storage.set(TOKEN_KEY, &session.token)?;
        if let Err(e) = self.storage.set(USER_KEY, &user) {
            self.roll_back_token(previous_token);
            return Err(e);
        }

        info!(user_id = %session.user.id, role = %session.role(), "Session established");
        self.state.send_replace(AuthState::Authenticated(session));
        Ok(())
    }

    /// Drop the persisted and the active session. Never fails.
    pub(crate) fn clear(&self) {
        self.remove_persisted();
        self.state.send_replace(AuthState::Anonymous);
        info!("Session cleared");
    }

    /// Rebuild the active session from storage.
    ///
    /// A token without a user, a user without a token, or a user record that
    /// no longer parses is discarded and both entries are removed.
    pub(crate) fn restore(&self) -> AuthState {
        let token = self.read(TOKEN_KEY);
        let raw_user = self.read(USER_KEY);
        let had_entries = token.is_some() || raw_user.is_some();

        let user = raw_user.and_then(|raw| match serde_json::from_str::<UserSummary>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Discarding unreadable persisted user: {}", e);
                None
            }
        });

        let state = match Session::from_parts(token, user) {
            Some(session) => {
                info!(user_id = %session.user.id, role = %session.role(), "Session restored");
                AuthState::Authenticated(session)
            }
            None => {
                if had_entries {
                    warn!("Discarding incomplete persisted session");
                    self.remove_persisted();
                } else {
                    debug!("No persisted session");
                }
                AuthState::Anonymous
            }
        };

        self.state.send_replace(state.clone());
        state
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, "Failed to read persisted session: {}", e);
                None
            }
        }
    }

    fn roll_back_token(&self, previous: Option<String>) {
        let restored = match previous {
            Some(token) => self.storage.set(TOKEN_KEY, &token),
            None => self.storage.remove(TOKEN_KEY),
        };
        if let Err(e) = restored {
            warn!("Failed to roll back persisted token, dropping session: {}", e);
            self.remove_persisted();
        }
    }

    fn remove_persisted(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key = %key, "Failed to remove persisted session entry: {}", e);
            }
        }
    }
}

impl TokenProvider for SessionStore {
    fn bearer_token(&self) -> Option<String> {
        self.session().map(|s| s.token)
    }
}
