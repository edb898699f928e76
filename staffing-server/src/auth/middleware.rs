//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::JwtService;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// `/api` routes reachable without a token
pub const PUBLIC_ROUTES: &[&str] = &["/api/health", "/api/auth/login", "/api/auth/register"];

/// Require a valid bearer token
///
/// Reads `Authorization: Bearer <token>`, verifies it through the auth
/// service (signature, expiry, issuer/audience, user still exists) and
/// inserts the [`CurrentUser`](crate::auth::CurrentUser) into the request
/// extensions.
///
/// Skipped for `OPTIONS` requests, paths outside `/api/` and
/// [`PUBLIC_ROUTES`].
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if PUBLIC_ROUTES.contains(&path.trim_end_matches('/')) {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    match state.auth_service().verify_token(token).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = e.message.clone(),
                uri = format!("{:?}", req.uri())
            );
            Err(e)
        }
    }
}
