//! Database liveness probe

use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::query::db_err;
use crate::domain::ports::DatabaseHealth;
use crate::error::DomainError;

pub struct PostgresHealth {
    db: DatabaseConnection,
}

impl PostgresHealth {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DatabaseHealth for PostgresHealth {
    async fn ping(&self) -> Result<(), DomainError> {
        self.db.ping().await.map_err(db_err)
    }
}
