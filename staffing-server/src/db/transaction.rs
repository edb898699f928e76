//! Transaction unit of work
//!
//! Collects SurrealQL statements and runs them as one
//! `BEGIN TRANSACTION; ... COMMIT TRANSACTION;` block. If any statement
//! fails, or a `THROW` fires, SurrealDB cancels the whole block and every
//! write is rolled back before the error is returned.

use super::repository::{RepoError, RepoResult, is_unique_violation};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::method::Query;

/// Marker prefix for `THROW` messages that mean "record vanished"
pub const MISSING_MARKER: &str = "missing:";

/// Error text SurrealDB attaches to statements skipped by a failed transaction
const NOT_EXECUTED: &str = "not executed due to a failed transaction";

/// `THROW` statement guarded by a condition
pub fn throw_missing_if(condition: &str, what: &str) -> String {
    format!("IF {condition} {{ THROW \"{MISSING_MARKER}{what}\" }}")
}

#[derive(Debug, Default)]
pub struct Transaction {
    statements: Vec<String>,
    label: &'static str,
}

impl Transaction {
    pub fn new(label: &'static str) -> Self {
        Self {
            statements: Vec::new(),
            label,
        }
    }

    /// Append a statement (trailing `;` optional)
    pub fn statement(mut self, sql: impl Into<String>) -> Self {
        let sql = sql.into();
        let sql = sql.trim().trim_end_matches(';').to_string();
        if !sql.is_empty() {
            self.statements.push(sql);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Full SurrealQL text of the block
    pub fn to_sql(&self) -> String {
        let mut sql = String::from("BEGIN TRANSACTION;\n");
        for stmt in &self.statements {
            sql.push_str(stmt);
            sql.push_str(";\n");
        }
        sql.push_str("COMMIT TRANSACTION;");
        sql
    }

    /// Run the block; `bind` attaches the parameters
    pub async fn execute<F>(self, db: &Surreal<Db>, bind: F) -> RepoResult<()>
    where
        F: FnOnce(Query<'_, Db>) -> Query<'_, Db>,
    {
        if self.statements.is_empty() {
            return Ok(());
        }
        let sql = self.to_sql();
        let mut response = bind(db.query(sql))
            .await
            .map_err(|e| RepoError::Transaction(format!("{}: {e}", self.label)))?;

        let errors = response.take_errors();
        if errors.is_empty() {
            tracing::debug!(tx = self.label, statements = self.statements.len(), "Transaction committed");
            return Ok(());
        }

        let mut ordered: Vec<(usize, String)> = errors
            .into_iter()
            .map(|(idx, err)| (idx, err.to_string()))
            .collect();
        ordered.sort_by_key(|(idx, _)| *idx);
        let cause = ordered
            .iter()
            .map(|(_, msg)| msg.as_str())
            .find(|msg| !msg.contains(NOT_EXECUTED))
            .or_else(|| ordered.first().map(|(_, msg)| msg.as_str()))
            .unwrap_or("unknown failure")
            .to_string();

        tracing::warn!(tx = self.label, error = %cause, "Transaction rolled back");
        Err(classify(&cause))
    }
}

/// Map the failing statement's message onto a repository error
pub fn classify(cause: &str) -> RepoError {
    if let Some(pos) = cause.find(MISSING_MARKER) {
        let what = cause[pos + MISSING_MARKER.len()..]
            .trim_end_matches(['"', '\'', '`'])
            .trim()
            .to_string();
        return RepoError::NotFound(what);
    }
    if is_unique_violation(cause) {
        return RepoError::Duplicate(cause.to_string());
    }
    RepoError::Transaction(cause.to_string())
}
