//! PostgreSQL adapter for SubscriptionTierRepository

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::query::{fetch_all, fetch_optional};
use crate::domain::entities::SubscriptionTier;
use crate::domain::ports::SubscriptionTierRepository;
use crate::error::DomainError;

pub struct PostgresSubscriptionTierRepository {
    db: DatabaseConnection,
}

impl PostgresSubscriptionTierRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionTierRepository for PostgresSubscriptionTierRepository {
    async fn list_active(&self) -> Result<Vec<SubscriptionTier>, DomainError> {
        fetch_all(
            &self.db,
            "SELECT * FROM subscription_tiers WHERE is_active = true ORDER BY sort_order, price_cents",
            vec![],
        )
        .await
    }

    async fn find(&self, id: &Uuid) -> Result<Option<SubscriptionTier>, DomainError> {
        fetch_optional(
            &self.db,
            "SELECT * FROM subscription_tiers WHERE id = $1",
            vec![(*id).into()],
        )
        .await
    }
}
