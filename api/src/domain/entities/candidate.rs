//! Candidate domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CandidateId, OrganizationId};
use crate::domain::transform::{FromRow, Row};

/// A person in an organization's talent pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub organization_id: OrganizationId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub resume_url: Option<String>,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl FromRow for Candidate {
    fn from_row(row: &serde_json::Value) -> Self {
        let r = Row::new(row);
        Candidate {
            id: r.uuid("id"),
            organization_id: r.uuid("organization_id"),
            first_name: r.string("first_name"),
            last_name: r.string("last_name"),
            email: r.string("email"),
            phone: r.opt_string("phone"),
            linkedin_url: r.opt_string("linkedin_url"),
            resume_url: r.opt_string("resume_url"),
            source: r.opt_string("source"),
            created_at: r.timestamp("created_at"),
        }
    }
}

/// Data needed to create a candidate
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCandidate {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub resume_url: Option<String>,
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transform::to_row;
    use serde_json::json;

    #[test]
    fn full_name_trims_missing_parts() {
        let c = Candidate::from_row(&json!({ "first_name": "Grace" }));
        assert_eq!(c.full_name(), "Grace");
    }

    #[test]
    fn candidate_transform_is_idempotent() {
        let once = Candidate::from_row(&json!({
            "id": "b0b0b0b0-0000-4000-8000-000000000001",
            "organization_id": "b0b0b0b0-0000-4000-8000-000000000002",
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": "grace@example.com",
            "source": "career_page",
            "created_at": "2024-04-04T04:04:04Z",
        }));
        assert_eq!(Candidate::from_row(&to_row(&once)), once);
    }
}
