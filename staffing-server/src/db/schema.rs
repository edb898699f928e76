//! Schema definitions
//!
//! Tables are schemaless; only indexes are declared. Every statement is
//! idempotent so the schema is applied on each start-up.

use super::repository::RepoResult;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
DEFINE INDEX IF NOT EXISTS user_email ON TABLE user FIELDS email UNIQUE;

DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
DEFINE INDEX IF NOT EXISTS employee_phone ON TABLE employee FIELDS phone UNIQUE;
DEFINE INDEX IF NOT EXISTS employee_created_at ON TABLE employee FIELDS created_at;

DEFINE TABLE IF NOT EXISTS event SCHEMALESS;
DEFINE INDEX IF NOT EXISTS event_date ON TABLE event FIELDS date;
DEFINE INDEX IF NOT EXISTS event_status ON TABLE event FIELDS status;

DEFINE TABLE IF NOT EXISTS assignment SCHEMALESS;
DEFINE INDEX IF NOT EXISTS assignment_pair ON TABLE assignment FIELDS event, employee UNIQUE;
DEFINE INDEX IF NOT EXISTS assignment_employee ON TABLE assignment FIELDS employee;
"#;

/// Apply table and index definitions
pub async fn apply(db: &Surreal<Db>) -> RepoResult<()> {
    db.query(SCHEMA).await?.check()?;
    tracing::info!("Database schema applied");
    Ok(())
}
