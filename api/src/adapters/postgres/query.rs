//! Raw statement helpers
//!
//! Rows come back as `JsonValue` objects keyed by column name and are shaped
//! by the transform layer.

use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, JsonValue, Statement,
    Value,
};

use crate::domain::transform::FromRow;
use crate::error::DomainError;

pub(crate) fn statement(sql: &str, values: Vec<Value>) -> Statement {
    Statement::from_sql_and_values(DbBackend::Postgres, sql, values)
}

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

pub(crate) async fn fetch_all<T: FromRow>(
    db: &DatabaseConnection,
    sql: &str,
    values: Vec<Value>,
) -> Result<Vec<T>, DomainError> {
    let rows = JsonValue::find_by_statement(statement(sql, values))
        .all(db)
        .await
        .map_err(db_err)?;

    Ok(T::from_rows(&rows))
}

pub(crate) async fn fetch_optional<T: FromRow>(
    db: &DatabaseConnection,
    sql: &str,
    values: Vec<Value>,
) -> Result<Option<T>, DomainError> {
    let row = JsonValue::find_by_statement(statement(sql, values))
        .one(db)
        .await
        .map_err(db_err)?;

    Ok(row.as_ref().map(T::from_row))
}

/// For `INSERT ... RETURNING *`
pub(crate) async fn fetch_one<T: FromRow>(
    db: &DatabaseConnection,
    sql: &str,
    values: Vec<Value>,
) -> Result<T, DomainError> {
    fetch_optional(db, sql, values)
        .await?
        .ok_or_else(|| DomainError::Internal("statement returned no row".to_string()))
}

/// Runs a statement and reports the number of affected rows
pub(crate) async fn execute(
    db: &DatabaseConnection,
    sql: &str,
    values: Vec<Value>,
) -> Result<u64, DomainError> {
    let result = db.execute(statement(sql, values)).await.map_err(db_err)?;
    Ok(result.rows_affected())
}

/// Escape `%`, `_` and `\` for use inside an `ILIKE` pattern
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
