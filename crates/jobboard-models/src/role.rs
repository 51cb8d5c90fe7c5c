//! User roles.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Role of an account. The set is closed: any other wire value is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Browses postings and applies to them
    Seeker,
    /// Publishes postings and reviews applicants
    Recruiter,
    /// Manages user accounts
    Admin,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Role; 3] = [Role::Seeker, Role::Recruiter, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Seeker => "SEEKER",
            Role::Recruiter => "RECRUITER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SEEKER" => Ok(Role::Seeker),
            "RECRUITER" => Ok(Role::Recruiter),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {0}")]
pub struct RoleParseError(pub String);
