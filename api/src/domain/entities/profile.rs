//! Profile domain entity
//!
//! A user's membership in an organization together with their role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OrganizationId, UserId};
use crate::domain::transform::{FromRow, Row};

/// Role strings stored on `profiles.role`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    Admin,
    OrgAdmin,
    SuperAdmin,
    Recruiter,
    HiringManager,
    Candidate,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::Owner,
        Role::Admin,
        Role::OrgAdmin,
        Role::SuperAdmin,
        Role::Recruiter,
        Role::HiringManager,
        Role::Candidate,
    ];

    /// Platform operator; never locked out by the subscription gate.
    ///
    /// This is not the `ManageBilling` permission. Paying for the organization
    /// is the job of `owner` and `admin`, who are org admins here and so only
    /// ever see the banner, never the blocking modal.
    pub fn is_platform_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin)
    }

    /// Organization administrators who see the billing banner instead of the block
    pub fn is_org_admin(&self) -> bool {
        matches!(self, Role::Owner | Role::Admin | Role::OrgAdmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::OrgAdmin => "org_admin",
            Role::SuperAdmin => "super_admin",
            Role::Recruiter => "recruiter",
            Role::HiringManager => "hiring_manager",
            Role::Candidate => "candidate",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "owner" => Ok(Role::Owner),
            "admin" => Ok(Role::Admin),
            "org_admin" => Ok(Role::OrgAdmin),
            "super_admin" => Ok(Role::SuperAdmin),
            "recruiter" => Ok(Role::Recruiter),
            "hiring_manager" => Ok(Role::HiringManager),
            "candidate" => Ok(Role::Candidate),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Authenticated caller as reported by the auth provider
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionUser {
    pub id: UserId,
    pub email: Option<String>,
}

/// A row of `profiles`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: UserId,
    pub organization_id: Option<OrganizationId>,
    /// Raw role string; see [`Profile::role`]
    pub role: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Parsed role, `None` for unknown strings
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

impl FromRow for Profile {
    fn from_row(row: &serde_json::Value) -> Self {
        let r = Row::new(row);
        Profile {
            user_id: r.uuid("user_id"),
            organization_id: r.opt_uuid("organization_id"),
            role: r.string("role"),
            full_name: r.opt_string("full_name"),
            email: r.opt_string("email"),
            avatar_url: r.opt_string("avatar_url"),
            created_at: r.timestamp("created_at"),
        }
    }
}
