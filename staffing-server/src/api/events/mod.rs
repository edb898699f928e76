//! Event API Module
//!
//! | Path | Method | Handler |
//! |------|--------|---------|
//! | /api/events | GET, POST | list, create |
//! | /api/events/{id} | GET, PUT, DELETE | get_by_id, update, delete |
//! | /api/events/{id}/guest | POST | add_guest |
//! | /api/events/{id}/guests | GET | list_guests |
//! | /api/events/{id}/guest/{guest_id} | DELETE | remove_guest |
//! | /api/events/{id}/invitations | GET | invitation |
//! | /api/events/{id}/employees | GET | employees |

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

/// Event router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/events", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/guest", post(handler::add_guest))
        .route("/{id}/guests", get(handler::list_guests))
        .route("/{id}/guest/{guest_id}", delete(handler::remove_guest))
        .route("/{id}/invitations", get(handler::invitation))
        .route("/{id}/employees", get(handler::employees))
}
