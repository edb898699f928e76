//! Authentication Handlers

use axum::extract::State;
use axum::http::StatusCode;

use crate::api::ApiJson;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{AuthResponse, LoginRequest, RegisterRequest, UserInfo};
use crate::utils::{ApiResponse, AppResult, created, ok, ok_with_message};

/// Create an account and sign it in
pub async fn register(
    State(state): State<ServerState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> AppResult<(StatusCode, ApiResponse<AuthResponse>)> {
    let auth = state.auth_service().register(req).await?;
    Ok(created("User registered successfully", auth))
}

pub async fn login(
    State(state): State<ServerState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> AppResult<ApiResponse<AuthResponse>> {
    let auth = state.auth_service().login(req).await?;
    Ok(ok_with_message("Login successful", auth))
}

/// The authenticated user, without credentials
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<ApiResponse<UserInfo>> {
    let info = state.auth_service().me(&user).await?;
    Ok(ok(info))
}
