//! Authenticated session.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Role, UserId};

/// Identity of the logged-in user, as persisted next to the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: Role,
}

impl UserSummary {
    /// "First Last", falling back to the email when both names are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }
}

/// Bearer token plus the user it was issued to.
///
/// A session only exists when both halves are present; use
/// [`Session::from_parts`] when rebuilding one from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Session {
    pub token: String,
    pub user: UserSummary,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserSummary) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Rebuild a session from independently stored halves.
    ///
    /// Returns `None` unless a non-empty token and a user are both present.
    pub fn from_parts(token: Option<String>, user: Option<UserSummary>) -> Option<Self> {
        match (token, user) {
            (Some(token), Some(user)) if !token.trim().is_empty() => Some(Self { token, user }),
            _ => None,
        }
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.user.role == role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserSummary {
        UserSummary {
            id: UserId(1),
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            role: Role::Seeker,
        }
    }

    #[test]
    fn test_from_parts_requires_both_halves() {
        assert!(Session::from_parts(Some("t".into()), None).is_none());
        assert!(Session::from_parts(None, Some(user())).is_none());
        assert!(Session::from_parts(Some("  ".into()), Some(user())).is_none());
        let session = Session::from_parts(Some("t".into()), Some(user())).unwrap();
        assert_eq!(session.token, "t");
        assert!(session.has_role(Role::Seeker));
        assert!(!session.has_role(Role::Admin));
    }

    #[test]
    fn test_user_summary_wire_format() {
        let json = r#"{"id":3,"email":"r@example.com","firstName":"Rita",
            "lastName":"Ng","role":"RECRUITER"}"#;
        let user: UserSummary = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, UserId(3));
        assert_eq!(user.role, Role::Recruiter);
        assert_eq!(user.display_name(), "Rita Ng");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut u = user();
        u.first_name.clear();
        u.last_name.clear();
        assert_eq!(u.display_name(), "ada@example.com");
    }
}
