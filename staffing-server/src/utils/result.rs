//! Repository-to-application error conversion
//!
//! Services use `?` on repository calls; this maps storage failures onto
//! the unified error codes.

use crate::db::repository::RepoError;
use crate::utils::{AppError, ErrorCode};

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Transaction(msg) => AppError::transaction(msg),
        }
    }
}
