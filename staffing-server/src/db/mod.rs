//! Database Module
//!
//! Embedded SurrealDB connection, schema, transactions, models and
//! repositories.

pub mod models;
pub mod repository;
pub mod schema;
pub mod transaction;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

/// Database service: owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the database named by `url` (`mem://` or `rocksdb://<path>`)
    /// and apply the schema
    pub async fn new(url: &str, namespace: &str, database: &str) -> Result<Self, AppError> {
        let db = open(url).await?;
        db.use_ns(namespace)
            .use_db(database)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        schema::apply(&db)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        tracing::info!(url = %url, namespace = %namespace, database = %database, "Database connection established");
        Ok(Self { db })
    }

    /// Fresh in-memory database with the schema applied
    pub async fn memory() -> Result<Self, AppError> {
        Self::new("mem://", "staffing", "main").await
    }
}

async fn open(url: &str) -> Result<Surreal<Db>, AppError> {
    if url == "mem://" || url == "memory" {
        return Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")));
    }

    if let Some(path) = url.strip_prefix("rocksdb://") {
        return open_rocksdb(path).await;
    }

    Err(AppError::database(format!("Unsupported DATABASE_URL: {url}")))
}

#[cfg(feature = "rocksdb")]
async fn open_rocksdb(path: &str) -> Result<Surreal<Db>, AppError> {
    use surrealdb::engine::local::RocksDb;
    Surreal::new::<RocksDb>(path)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))
}

#[cfg(not(feature = "rocksdb"))]
async fn open_rocksdb(path: &str) -> Result<Surreal<Db>, AppError> {
    Err(AppError::database(format!(
        "rocksdb storage at '{path}' requires the `rocksdb` feature"
    )))
}
