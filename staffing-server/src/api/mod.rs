//! HTTP API
//!
//! One router per resource, all under `/api`:
//!
//! - [`health`] - liveness and database check
//! - [`auth`] - register, login, current user
//! - [`events`] - events, guests and event projections
//! - [`employees`] - employees and their events
//! - [`assignments`] - event/employee assignments

pub mod extract;

pub mod assignments;
pub mod auth;
pub mod employees;
pub mod events;
pub mod health;

use axum::Router;

use crate::core::ServerState;

pub use extract::{ApiJson, ApiQuery};

/// All resource routers, without middleware or state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(events::router())
        .merge(employees::router())
        .merge(assignments::router())
}
