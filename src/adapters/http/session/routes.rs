//! HTTP routes for session operator endpoints.

use axum::{routing::get, Router};

use super::handlers::{delete_session, get_session, list_pending_sessions, SessionHandlers};

/// Creates the session router, to be nested under `/api/v1/sessions`.
pub fn session_routes(handlers: SessionHandlers) -> Router {
    Router::new()
        .route("/pending", get(list_pending_sessions))
        .route("/:id", get(get_session).delete(delete_session))
        .with_state(handlers)
}
