//! Repository Module
//!
//! Entity-specific access to the SurrealDB tables. Record links are stored
//! as native record ids and always bound as `RecordId` values.

pub mod assignment;
pub mod employee;
pub mod event;
pub mod user;

// Re-exports
pub use assignment::AssignmentRepository;
pub use employee::EmployeeRepository;
pub use event::{EventFilter, EventRepository};
pub use user::UserRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Transaction failed: {0}")]
    Transaction(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl RepoError {
    /// Map a write error, turning UNIQUE index violations into `Duplicate`
    pub fn from_write(err: surrealdb::Error, duplicate_message: &str) -> Self {
        if is_unique_violation(&err.to_string()) {
            RepoError::Duplicate(duplicate_message.to_string())
        } else {
            RepoError::from(err)
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// True when a SurrealDB error message comes from a UNIQUE index
pub fn is_unique_violation(message: &str) -> bool {
    let msg = message.to_lowercase();
    msg.contains("already contains") || msg.contains("already exists") || msg.contains("unique")
}

/// Row shape of `SELECT count() ... GROUP ALL`
#[derive(Debug, serde::Deserialize)]
pub(crate) struct CountRow {
    pub count: u64,
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Select one record by id
    pub async fn find<T>(&self, id: &RecordId) -> RepoResult<Option<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let found: Option<T> = self.db.select(id.clone()).await?;
        Ok(found)
    }

    /// True when the record exists
    pub async fn exists(&self, id: &RecordId) -> RepoResult<bool> {
        let ids: Vec<RecordId> = self
            .db
            .query("SELECT VALUE id FROM $thing")
            .bind(("thing", id.clone()))
            .await?
            .take(0)?;
        Ok(!ids.is_empty())
    }

    /// Count rows of a table matching a WHERE clause (empty clause counts all)
    pub async fn count_where<F>(&self, table: &str, where_clause: &str, bind: F) -> RepoResult<u64>
    where
        F: FnOnce(
            surrealdb::method::Query<'_, Db>,
        ) -> surrealdb::method::Query<'_, Db>,
    {
        let sql = format!("SELECT count() FROM {table}{where_clause} GROUP ALL");
        let rows: Vec<CountRow> = bind(self.db.query(sql)).await?.take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_detection() {
        assert!(is_unique_violation(
            "Database index `employee_phone` already contains '5551234567', with record `employee:x`"
        ));
        assert!(!is_unique_violation("There was a problem with the database"));
    }
}
