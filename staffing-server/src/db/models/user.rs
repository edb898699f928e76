//! User Model

use super::serde_helpers;
use crate::auth::password;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// User ID type
pub type UserId = RecordId;

/// User record
///
/// `hash_pass` is absent for accounts created through an external identity
/// provider; those accounts cannot log in with a password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<UserId>,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Lowercased, trimmed, unique
    pub email: String,
    #[serde(default, skip_serializing)]
    pub hash_pass: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl User {
    /// Verify password against the stored hash
    ///
    /// Returns `Ok(false)` on mismatch; `Err` only for a corrupt hash.
    pub fn verify_password(&self, candidate: &str) -> Result<bool, argon2::password_hash::Error> {
        match &self.hash_pass {
            Some(hash) => password::verify_password(candidate, hash),
            None => Ok(false),
        }
    }
}

/// User as seen by clients (no password material)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_string()).unwrap_or_default(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Registration payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Register/login response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserInfo,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_never_serialized() {
        let user = User {
            id: Some(RecordId::from_table_key("user", "u1")),
            first_name: "Ana".into(),
            last_name: None,
            email: "ana@example.com".into(),
            hash_pass: Some("$argon2id$secret".into()),
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hash_pass"));
        assert!(!json.contains("argon2"));

        let info = UserInfo::from(user);
        assert_eq!(info.id, "user:u1");
    }

    #[test]
    fn test_external_account_never_verifies() {
        let user = User {
            id: None,
            first_name: "Ana".into(),
            last_name: None,
            email: "ana@example.com".into(),
            hash_pass: None,
            created_at: 0,
            updated_at: 0,
        };
        assert!(!user.verify_password("anything").unwrap());
    }
}
