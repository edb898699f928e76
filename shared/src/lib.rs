//! Shared types for the staffing backend
//!
//! Types used across crates that do not depend on the storage engine:
//! the unified error system, response envelope and pagination metadata.

pub mod error;
pub mod types;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use types::Pagination;
