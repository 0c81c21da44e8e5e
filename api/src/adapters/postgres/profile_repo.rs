//! PostgreSQL adapter for ProfileRepository

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::query::{execute, fetch_all, fetch_optional};
use crate::domain::entities::{OrganizationId, Profile, Role, UserId};
use crate::domain::ports::ProfileRepository;
use crate::error::DomainError;

/// PostgreSQL implementation of ProfileRepository
pub struct PostgresProfileRepository {
    db: DatabaseConnection,
}

impl PostgresProfileRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        fetch_optional(
            &self.db,
            "SELECT * FROM profiles WHERE user_id = $1",
            vec![user_id.0.into()],
        )
        .await
    }

    async fn list_by_organization(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<Profile>, DomainError> {
        fetch_all(
            &self.db,
            "SELECT * FROM profiles WHERE organization_id = $1 ORDER BY created_at",
            vec![organization_id.0.into()],
        )
        .await
    }

    async fn update_role(
        &self,
        organization_id: &OrganizationId,
        user_id: &UserId,
        role: Role,
    ) -> Result<bool, DomainError> {
        let updated = execute(
            &self.db,
            "UPDATE profiles SET role = $3 WHERE organization_id = $1 AND user_id = $2",
            vec![
                organization_id.0.into(),
                user_id.0.into(),
                role.to_string().into(),
            ],
        )
        .await?;

        Ok(updated > 0)
    }
}
