//! Assignment API Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::api::ApiJson;
use crate::core::ServerState;
use crate::db::models::{AssignmentDetail, AssignmentInput};
use crate::utils::{ApiResponse, AppResult, created, ok_with_message};

/// Create the pair's assignment and link it to the event
pub async fn create(
    State(state): State<ServerState>,
    Path((event_id, employee_id)): Path<(String, String)>,
    ApiJson(payload): ApiJson<AssignmentInput>,
) -> AppResult<(StatusCode, ApiResponse<AssignmentDetail>)> {
    let assignment = state
        .assignment_service()
        .create_assignment(&event_id, &employee_id, payload)
        .await?;
    Ok(created("Assignment created successfully", assignment))
}

pub async fn update(
    State(state): State<ServerState>,
    Path((event_id, employee_id)): Path<(String, String)>,
    ApiJson(payload): ApiJson<AssignmentInput>,
) -> AppResult<ApiResponse<AssignmentDetail>> {
    let assignment = state
        .assignment_service()
        .update_assignment(&event_id, &employee_id, payload)
        .await?;
    Ok(ok_with_message("Assignment updated successfully", assignment))
}

/// Unlink the pair's assignment from its event and delete it
pub async fn delete(
    State(state): State<ServerState>,
    Path((event_id, employee_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<()>> {
    state
        .assignment_service()
        .delete_assignment(&event_id, &employee_id)
        .await?;
    Ok(ApiResponse::message("Assignment deleted successfully"))
}
