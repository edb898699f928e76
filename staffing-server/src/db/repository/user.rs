//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::User;
use crate::utils::time::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<User>> {
        self.base.find(id).await
    }

    /// Find user by (already normalized) email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a user; a registered email is `Duplicate`
    ///
    /// `hash_pass` is `None` for external-identity accounts.
    pub async fn create(
        &self,
        first_name: String,
        last_name: Option<String>,
        email: String,
        hash_pass: Option<String>,
    ) -> RepoResult<User> {
        let now = now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE user SET
                    first_name = $first_name,
                    last_name = $last_name,
                    email = $email,
                    hash_pass = $hash_pass,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("first_name", first_name))
            .bind(("last_name", last_name))
            .bind(("email", email))
            .bind(("hash_pass", hash_pass))
            .bind(("now", now))
            .await
            .map_err(|e| RepoError::from_write(e, "User with this email already exists"))?;

        let created: Option<User> = result
            .take(0)
            .map_err(|e| RepoError::from_write(e, "User with this email already exists"))?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }
}
