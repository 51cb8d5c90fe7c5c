//! OAuth redirect callback.
//!
//! After a provider login the API redirects to
//! `/oauth/callback?token=..&id=..&email=..&firstName=..&lastName=..&role=..`.
//! The query string is the only carrier of the session.

use jobboard_models::{Role, Session, UserId, UserSummary};
use url::Url;

use crate::error::{AuthError, AuthResult};

/// Base used to resolve a bare path such as `/oauth/callback?...`.
const LOCAL_ORIGIN: &str = "http://localhost";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCallback {
    pub token: String,
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Raw role parameter, checked when the session is built.
    pub role: String,
}

impl OAuthCallback {
    /// Parse a full callback URL or a path with query string.
    pub fn from_url(input: &str) -> AuthResult<Self> {
        let base = Url::parse(LOCAL_ORIGIN).map_err(|e| AuthError::oauth(e.to_string()))?;
        let url = base
            .join(input.trim())
            .map_err(|e| AuthError::oauth(format!("malformed URL: {}", e)))?;

        let mut token = None;
        let mut id = None;
        let mut email = None;
        let mut first_name = String::new();
        let mut last_name = String::new();
        let mut role = None;

        for (key, value) in url.query_pairs() {
            let value = value.trim().to_string();
            match &*key {
                "error" => return Err(AuthError::oauth(format!("provider error: {}", value))),
                "token" => token = Some(value),
                "id" => id = Some(value),
                "email" => email = Some(value),
                "firstName" => first_name = value,
                "lastName" => last_name = value,
                "role" => role = Some(value),
                _ => {}
            }
        }

        let token = non_empty(token, "token")?;
        let id = non_empty(id, "id")?
            .parse::<UserId>()
            .map_err(|_| AuthError::oauth("id is not a number"))?;
        let email = non_empty(email, "email")?;
        let role = non_empty(role, "role")?;

        Ok(Self {
            token,
            id,
            email,
            first_name,
            last_name,
            role,
        })
    }

    /// Build the session this callback describes.
    pub fn into_session(self) -> AuthResult<Session> {
        let role: Role = self
            .role
            .parse()
            .map_err(|_| AuthError::UnrecognizedRole(self.role.clone()))?;
        Ok(Session::new(
            self.token,
            UserSummary {
                id: self.id,
                email: self.email,
                first_name: self.first_name,
                last_name: self.last_name,
                role,
            },
        ))
    }
}

fn non_empty(value: Option<String>, name: &str) -> AuthResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AuthError::oauth(format!("missing {}", name)))
}
