//! Admin-facing account records.

use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Role, UserId};

/// A user account as listed on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub created_at: NaiveDateTime,
}

impl UserAccount {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Totals shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    #[serde(default)]
    pub total_jobs: u64,
    #[serde(default)]
    pub total_applications: u64,
    #[serde(default)]
    pub total_recruiters: u64,
    #[serde(default)]
    pub total_seekers: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_wire_format() {
        let json = r#"{"id":7,"firstName":"Sam","lastName":"Lee","email":"sam@example.com",
            "role":"SEEKER","isActive":false,"createdAt":"2024-01-05T12:00:00"}"#;
        let account: UserAccount = serde_json::from_str(json).unwrap();
        assert_eq!(account.id, UserId(7));
        assert!(!account.is_active);
        assert_eq!(account.full_name(), "Sam Lee");
    }

    #[test]
    fn test_stats_wire_format() {
        let json =
            r#"{"totalJobs":12,"totalApplications":40,"totalRecruiters":3,"totalSeekers":25}"#;
        let stats: AdminStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_seekers, 25);
    }
}
