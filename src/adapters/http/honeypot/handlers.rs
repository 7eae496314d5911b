//! HTTP handler for the turn endpoint.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::session::ErrorResponse;
use crate::application::handlers::conversation::{ConversationCoordinator, ProcessTurnCommand};
use crate::domain::foundation::SessionId;

use super::dto::{HoneypotRequest, HoneypotResponse};

#[derive(Clone)]
pub struct HoneypotHandlers {
    coordinator: Arc<ConversationCoordinator>,
}

impl HoneypotHandlers {
    pub fn new(coordinator: Arc<ConversationCoordinator>) -> Self {
        Self { coordinator }
    }
}

/// POST /honeypot and /api/v1/honeypot - Process one inbound message
pub async fn handle_turn(
    State(handlers): State<HoneypotHandlers>,
    Json(req): Json<HoneypotRequest>,
) -> Response {
    let session_id = match SessionId::new(req.session_id) {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    let history = req
        .conversation_history
        .into_iter()
        .map(|m| m.into_message())
        .collect();
    let mut cmd = ProcessTurnCommand::new(session_id, req.message.into_message()).with_history(history);
    if let Some(metadata) = req.metadata {
        cmd = cmd.with_metadata(metadata);
    }

    // Delivery runs detached; the reply does not wait for it.
    let result = handlers.coordinator.handle(cmd).await;

    (StatusCode::OK, Json(HoneypotResponse::success(result.reply))).into_response()
}
