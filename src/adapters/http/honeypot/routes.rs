//! HTTP routes for the turn endpoint.

use axum::{routing::post, Router};

use super::handlers::{handle_turn, HoneypotHandlers};

/// Creates the turn router. Mounted at the root and under `/api/v1`.
pub fn honeypot_routes(handlers: HoneypotHandlers) -> Router {
    Router::new()
        .route("/honeypot", post(handle_turn))
        .with_state(handlers)
}
