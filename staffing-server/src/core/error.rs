use thiserror::Error;

/// Process-level failures (start-up and serving)
///
/// Request handling uses [`AppError`](crate::utils::AppError); this type
/// only covers what can stop the server.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<crate::utils::AppError> for ServerError {
    fn from(err: crate::utils::AppError) -> Self {
        if err.code == crate::utils::ErrorCode::DatabaseError {
            ServerError::Database(err.message)
        } else {
            ServerError::Internal(anyhow::anyhow!(err))
        }
    }
}

/// Result alias for server-level operations
pub type Result<T> = std::result::Result<T, ServerError>;
