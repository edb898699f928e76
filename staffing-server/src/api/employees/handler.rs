//! Employee API Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;

use crate::api::{ApiJson, ApiQuery};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Employee, EmployeeCreate, EmployeeUpdate, EventWithAssignment};
use crate::services::employee::{EmployeePage, EmployeeQuery};
use crate::utils::{ApiResponse, AppResult, created, ok, ok_with_message};

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<EmployeeCreate>,
) -> AppResult<(StatusCode, ApiResponse<Employee>)> {
    let employee = state
        .employee_service()
        .create_employee(payload, &user)
        .await?;
    Ok(created("Employee created successfully", employee))
}

/// Paginated listing, newest first
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<EmployeeQuery>,
) -> AppResult<ApiResponse<EmployeePage>> {
    let page = state.employee_service().list_employees(query).await?;
    Ok(ok(page))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Employee>> {
    let employee = state.employee_service().get_employee(&id).await?;
    Ok(ok(employee))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<EmployeeUpdate>,
) -> AppResult<ApiResponse<Employee>> {
    let employee = state
        .employee_service()
        .update_employee(&id, payload)
        .await?;
    Ok(ok_with_message("Employee updated successfully", employee))
}

/// Delete an employee together with its assignments
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.employee_service().delete_employee(&id).await?;
    Ok(ApiResponse::message("Employee deleted successfully"))
}

pub async fn events(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<EventWithAssignment>>> {
    let events = state.employee_service().get_employee_events(&id).await?;
    Ok(ok(events))
}
