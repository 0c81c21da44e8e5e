//! PostgreSQL adapter for OrganizationRepository

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::query::{execute, fetch_optional};
use crate::domain::entities::{CareerPageUpdate, Organization, OrganizationId, SubscriptionStatus};
use crate::domain::ports::OrganizationRepository;
use crate::error::DomainError;

/// PostgreSQL implementation of OrganizationRepository
pub struct PostgresOrganizationRepository {
    db: DatabaseConnection,
}

impl PostgresOrganizationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrganizationRepository for PostgresOrganizationRepository {
    async fn find_by_id(&self, id: &OrganizationId) -> Result<Option<Organization>, DomainError> {
        fetch_optional(
            &self.db,
            "SELECT * FROM organizations WHERE id = $1",
            vec![id.0.into()],
        )
        .await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Organization>, DomainError> {
        fetch_optional(
            &self.db,
            "SELECT * FROM organizations WHERE slug = $1",
            vec![slug.to_lowercase().into()],
        )
        .await
    }

    async fn find_by_billing_customer(
        &self,
        customer_id: &str,
    ) -> Result<Option<Organization>, DomainError> {
        fetch_optional(
            &self.db,
            "SELECT * FROM organizations WHERE billing_customer_id = $1",
            vec![customer_id.to_string().into()],
        )
        .await
    }

    async fn update_career_page(
        &self,
        id: &OrganizationId,
        update: &CareerPageUpdate,
    ) -> Result<Option<Organization>, DomainError> {
        fetch_optional(
            &self.db,
            r#"UPDATE organizations SET
                career_page_enabled = COALESCE($2, career_page_enabled),
                career_page_headline = COALESCE($3, career_page_headline),
                career_page_intro = COALESCE($4, career_page_intro),
                brand_color = COALESCE($5, brand_color),
                logo_url = COALESCE($6, logo_url),
                description = COALESCE($7, description),
                website = COALESCE($8, website)
            WHERE id = $1
            RETURNING *"#,
            vec![
                id.0.into(),
                update.career_page_enabled.into(),
                update.career_page_headline.clone().into(),
                update.career_page_intro.clone().into(),
                update.brand_color.clone().into(),
                update.logo_url.clone().into(),
                update.description.clone().into(),
                update.website.clone().into(),
            ],
        )
        .await
    }

    async fn update_subscription(
        &self,
        id: &OrganizationId,
        status: SubscriptionStatus,
        tier_id: Option<Uuid>,
        customer_id: Option<&str>,
    ) -> Result<(), DomainError> {
        let updated = execute(
            &self.db,
            r#"UPDATE organizations SET
                subscription_status = $2,
                subscription_tier_id = COALESCE($3, subscription_tier_id),
                billing_customer_id = COALESCE($4, billing_customer_id)
            WHERE id = $1"#,
            vec![
                id.0.into(),
                status.to_string().into(),
                tier_id.into(),
                customer_id.map(str::to_string).into(),
            ],
        )
        .await?;

        if updated == 0 {
            return Err(DomainError::NotFound(format!("Organization {}", id)));
        }
        Ok(())
    }
}
