//! Utility module - common helpers and types
//!
//! - [`AppError`] / [`ApiResponse`] - unified error system (from `shared::error`)
//! - [`validation`] - pure input validators and [`ValidationReport`](validation::ValidationReport)
//! - [`logger`] - tracing subscriber setup
//! - [`time`] - date/time parsing helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod types;
pub mod validation;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use error::{created, ok, ok_with_message};
