//! PostgreSQL adapter for InvitationRepository

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::query::{fetch_one, fetch_optional};
use crate::domain::entities::{Invitation, NewInvitation, OrganizationId};
use crate::domain::ports::InvitationRepository;
use crate::error::DomainError;

pub struct PostgresInvitationRepository {
    db: DatabaseConnection,
}

impl PostgresInvitationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InvitationRepository for PostgresInvitationRepository {
    async fn find_pending(
        &self,
        organization_id: &OrganizationId,
        email: &str,
    ) -> Result<Option<Invitation>, DomainError> {
        fetch_optional(
            &self.db,
            r#"SELECT * FROM invitations
            WHERE organization_id = $1
              AND lower(email) = lower($2)
              AND accepted = false
              AND expires_at > now()
            ORDER BY created_at DESC
            LIMIT 1"#,
            vec![organization_id.0.into(), email.to_string().into()],
        )
        .await
    }

    async fn create(&self, invitation: &NewInvitation) -> Result<Invitation, DomainError> {
        fetch_one(
            &self.db,
            r#"INSERT INTO invitations (
                id, organization_id, email, role, token, invited_by, accepted,
                expires_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, false, $7, now())
            RETURNING *"#,
            vec![
                Uuid::new_v4().into(),
                invitation.organization_id.0.into(),
                invitation.email.clone().into(),
                invitation.role.to_string().into(),
                invitation.token.clone().into(),
                invitation.invited_by.0.into(),
                invitation.expires_at.into(),
            ],
        )
        .await
    }
}
