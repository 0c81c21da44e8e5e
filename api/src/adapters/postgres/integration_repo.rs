//! PostgreSQL adapter for IntegrationRepository
//!
//! Sealed secrets live in `client_secret_encrypted`, `access_token_encrypted`
//! and `refresh_token_encrypted`; only `find_active_credential` reads one back.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use super::query::{execute, fetch_all, fetch_one, fetch_optional};
use crate::domain::entities::{
    CalendarConnection, IntegrationCredential, NewCalendarConnection, OAuthProvider,
    OrganizationId, SaveIntegrationCredential, UserId,
};
use crate::domain::ports::IntegrationRepository;
use crate::domain::transform::{FromRow, Row};
use crate::error::DomainError;

const CREDENTIAL_COLUMNS: &str =
    "id, organization_id, provider, client_id, redirect_uri, is_active, updated_by, updated_at";

const CONNECTION_COLUMNS: &str = "id, user_id, provider, expires_at, created_at";

/// Credential row together with its sealed secret
struct SealedCredential {
    credential: IntegrationCredential,
    client_secret_sealed: String,
}

impl FromRow for SealedCredential {
    fn from_row(row: &serde_json::Value) -> Self {
        SealedCredential {
            credential: IntegrationCredential::from_row(row),
            client_secret_sealed: Row::new(row).string("client_secret_encrypted"),
        }
    }
}

pub struct PostgresIntegrationRepository {
    db: DatabaseConnection,
}

impl PostgresIntegrationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl IntegrationRepository for PostgresIntegrationRepository {
    async fn list_credentials(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<IntegrationCredential>, DomainError> {
        fetch_all(
            &self.db,
            &format!(
                "SELECT {} FROM integration_credentials WHERE organization_id = $1 ORDER BY provider",
                CREDENTIAL_COLUMNS
            ),
            vec![organization_id.0.into()],
        )
        .await
    }

    async fn find_active_credential(
        &self,
        organization_id: &OrganizationId,
        provider: OAuthProvider,
    ) -> Result<Option<(IntegrationCredential, String)>, DomainError> {
        let sealed: Option<SealedCredential> = fetch_optional(
            &self.db,
            r#"SELECT * FROM integration_credentials
            WHERE organization_id = $1 AND provider = $2 AND is_active = true"#,
            vec![organization_id.0.into(), provider.to_string().into()],
        )
        .await?;

        Ok(sealed.map(|s| (s.credential, s.client_secret_sealed)))
    }

    async fn save_credential(
        &self,
        credential: &SaveIntegrationCredential,
    ) -> Result<IntegrationCredential, DomainError> {
        fetch_one(
            &self.db,
            &format!(
                r#"INSERT INTO integration_credentials (
                    id, organization_id, provider, client_id, client_secret_encrypted,
                    redirect_uri, is_active, updated_by, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, now())
                ON CONFLICT (organization_id, provider) DO UPDATE SET
                    client_id = EXCLUDED.client_id,
                    client_secret_encrypted = EXCLUDED.client_secret_encrypted,
                    redirect_uri = EXCLUDED.redirect_uri,
                    is_active = EXCLUDED.is_active,
                    updated_by = EXCLUDED.updated_by,
                    updated_at = now()
                RETURNING {}"#,
                CREDENTIAL_COLUMNS
            ),
            vec![
                Uuid::new_v4().into(),
                credential.organization_id.0.into(),
                credential.provider.to_string().into(),
                credential.client_id.clone().into(),
                credential.client_secret_sealed.clone().into(),
                credential.redirect_uri.clone().into(),
                credential.is_active.into(),
                credential.updated_by.0.into(),
            ],
        )
        .await
    }

    async fn list_connections(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<CalendarConnection>, DomainError> {
        fetch_all(
            &self.db,
            &format!(
                "SELECT {} FROM calendar_connections WHERE user_id = $1 ORDER BY provider",
                CONNECTION_COLUMNS
            ),
            vec![user_id.0.into()],
        )
        .await
    }

    async fn upsert_connection(
        &self,
        connection: &NewCalendarConnection,
    ) -> Result<CalendarConnection, DomainError> {
        fetch_one(
            &self.db,
            &format!(
                r#"INSERT INTO calendar_connections (
                    id, user_id, provider, access_token_encrypted, refresh_token_encrypted,
                    expires_at, created_at
                ) VALUES ($1, $2, $3, $4, $5, $6, now())
                ON CONFLICT (user_id, provider) DO UPDATE SET
                    access_token_encrypted = EXCLUDED.access_token_encrypted,
                    refresh_token_encrypted = COALESCE(
                        EXCLUDED.refresh_token_encrypted,
                        calendar_connections.refresh_token_encrypted
                    ),
                    expires_at = EXCLUDED.expires_at
                RETURNING {}"#,
                CONNECTION_COLUMNS
            ),
            vec![
                Uuid::new_v4().into(),
                connection.user_id.0.into(),
                connection.provider.to_string().into(),
                connection.access_token_sealed.clone().into(),
                connection.refresh_token_sealed.clone().into(),
                connection.expires_at.into(),
            ],
        )
        .await
    }

    async fn delete_connection(
        &self,
        user_id: &UserId,
        provider: OAuthProvider,
    ) -> Result<bool, DomainError> {
        let deleted = execute(
            &self.db,
            "DELETE FROM calendar_connections WHERE user_id = $1 AND provider = $2",
            vec![user_id.0.into(), provider.to_string().into()],
        )
        .await?;

        Ok(deleted > 0)
    }
}
