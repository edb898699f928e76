//! Assignment API Module
//!
//! An assignment is addressed by its (event, employee) pair.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Assignment router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/assignments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route(
        "/event/{event_id}/employee/{employee_id}",
        post(handler::create)
            .put(handler::update)
            .delete(handler::delete),
    )
}
