//! Event API Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::api::{ApiJson, ApiQuery};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    EmployeeWithAssignment, Event, EventCreate, EventUpdate, Guest, GuestCreate, InvitationView,
};
use crate::services::event::{EventPage, EventQuery};
use crate::utils::{ApiResponse, AppResult, created, ok, ok_with_message};

pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    ApiJson(payload): ApiJson<EventCreate>,
) -> AppResult<(StatusCode, ApiResponse<Event>)> {
    let event = state.event_service().create_event(payload, &user).await?;
    Ok(created("Event created successfully", event))
}

/// Filtered, paginated listing
pub async fn list(
    State(state): State<ServerState>,
    ApiQuery(query): ApiQuery<EventQuery>,
) -> AppResult<ApiResponse<EventPage>> {
    let page = state.event_service().search_events(query).await?;
    Ok(ok(page))
}

pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Event>> {
    let event = state.event_service().get_event(&id).await?;
    Ok(ok(event))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<EventUpdate>,
) -> AppResult<ApiResponse<Event>> {
    let event = state.event_service().update_event(&id, patch).await?;
    Ok(ok_with_message("Event updated successfully", event))
}

/// Delete an event together with its assignments
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.event_service().delete_event(&id).await?;
    Ok(ApiResponse::message("Event deleted successfully"))
}

/// 201 when the guest was added, 200 when the email was already listed
pub async fn add_guest(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<GuestCreate>,
) -> AppResult<Response> {
    let (event, added) = state.event_service().add_guest(&id, payload).await?;
    let response = if added {
        created("Guest added successfully", event).into_response()
    } else {
        ok_with_message("Guest with this email already exists", event).into_response()
    };
    Ok(response)
}

pub async fn list_guests(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<Guest>>> {
    let guests = state.event_service().list_guests(&id).await?;
    Ok(ok(guests))
}

/// `guest_id` is the guest's generated id or its email
pub async fn remove_guest(
    State(state): State<ServerState>,
    Path((id, guest_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<Event>> {
    let event = state.event_service().remove_guest(&id, &guest_id).await?;
    Ok(ok_with_message("Guest removed successfully", event))
}

pub async fn invitation(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<InvitationView>> {
    let view = state.event_service().get_invitation(&id).await?;
    Ok(ok(view))
}

pub async fn employees(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Vec<EmployeeWithAssignment>>> {
    let employees = state.event_service().get_event_employees(&id).await?;
    Ok(ok(employees))
}
