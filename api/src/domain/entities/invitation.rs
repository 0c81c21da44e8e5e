//! Team invitation entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OrganizationId, Role, UserId};
use crate::domain::transform::{FromRow, Row};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: Uuid,
    pub organization_id: OrganizationId,
    pub email: String,
    pub role: String,
    /// One-time acceptance token
    #[serde(skip_serializing)]
    pub token: String,
    pub invited_by: Option<UserId>,
    pub accepted: bool,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl FromRow for Invitation {
    fn from_row(row: &serde_json::Value) -> Self {
        let r = Row::new(row);
        Invitation {
            id: r.uuid("id"),
            organization_id: r.uuid("organization_id"),
            email: r.string("email"),
            role: r.string("role"),
            token: r.string("token"),
            invited_by: r.opt_uuid("invited_by"),
            accepted: r.bool("accepted"),
            expires_at: r.timestamp("expires_at"),
            created_at: r.timestamp("created_at"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewInvitation {
    pub organization_id: OrganizationId,
    pub email: String,
    pub role: Role,
    pub token: String,
    pub invited_by: UserId,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transform::to_row;
    use serde_json::json;

    fn raw_invitation() -> serde_json::Value {
        json!({
            "id": "5b0e1d4c-8d62-4c3a-9f0e-2a1b3c4d5e01",
            "organization_id": "5b0e1d4c-8d62-4c3a-9f0e-2a1b3c4d5e02",
            "email": "new.hire@acme.test",
            "role": "recruiter",
            "token": "0f".repeat(32),
            "invited_by": "5b0e1d4c-8d62-4c3a-9f0e-2a1b3c4d5e03",
            "accepted": "f",
            "expires_at": "2026-03-08T12:00:00Z",
            "created_at": "2026-03-01 12:00:00"
        })
    }

    #[test]
    fn token_never_leaves_the_server() {
        let invitation = Invitation::from_row(&raw_invitation());
        assert_eq!(invitation.token.len(), 64);
        let json = serde_json::to_value(&invitation).unwrap();
        assert!(json.get("token").is_none());
        assert_eq!(json["invitedBy"], "5b0e1d4c-8d62-4c3a-9f0e-2a1b3c4d5e03");
    }

    #[test]
    fn invitation_transform_is_idempotent_apart_from_the_token() {
        let once = Invitation::from_row(&raw_invitation());
        let twice = Invitation::from_row(&to_row(&once));
        assert_eq!(
            twice,
            Invitation {
                token: String::new(),
                ..once
            }
        );
    }
}
