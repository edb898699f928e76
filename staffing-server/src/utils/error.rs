//! Unified error handling
//!
//! Re-exports the error system from `shared::error` and adds the response
//! helpers used by handlers.
//!
//! # Example
//!
//! ```ignore
//! // Return an error
//! Err(AppError::new(ErrorCode::EventNotFound))
//!
//! // Return a success envelope
//! Ok(ok_with_message("Event updated successfully", event))
//! ```

use axum::http::StatusCode;
use serde::Serialize;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// 200 envelope with data
pub fn ok<T: Serialize>(data: T) -> ApiResponse<T> {
    ApiResponse::success(data)
}

/// 200 envelope with data and a message
pub fn ok_with_message<T: Serialize>(message: impl Into<String>, data: T) -> ApiResponse<T> {
    ApiResponse::success_with_message(message, data)
}

/// 201 envelope with data and a message
pub fn created<T: Serialize>(
    message: impl Into<String>,
    data: T,
) -> (StatusCode, ApiResponse<T>) {
    (
        StatusCode::CREATED,
        ApiResponse::success_with_message(message, data),
    )
}
