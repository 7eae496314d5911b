//! HTTP handlers for session operator endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::session::{
    DeleteSessionCommand, DeleteSessionHandler, GetSessionHandler, GetSessionQuery,
    ListPendingSessionsHandler,
};
use crate::domain::foundation::SessionId;
use crate::domain::session::SessionError;

use super::dto::{ErrorResponse, PendingSessionsResponse, SessionResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SessionHandlers {
    get_handler: Arc<GetSessionHandler>,
    delete_handler: Arc<DeleteSessionHandler>,
    pending_handler: Arc<ListPendingSessionsHandler>,
}

impl SessionHandlers {
    pub fn new(
        get_handler: Arc<GetSessionHandler>,
        delete_handler: Arc<DeleteSessionHandler>,
        pending_handler: Arc<ListPendingSessionsHandler>,
    ) -> Self {
        Self {
            get_handler,
            delete_handler,
            pending_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/v1/sessions/:id - Inspect a session
pub async fn get_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match SessionId::new(session_id) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    match handlers.get_handler.handle(GetSessionQuery { session_id }).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// DELETE /api/v1/sessions/:id - Remove a session
pub async fn delete_session(
    State(handlers): State<SessionHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match SessionId::new(session_id) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    match handlers
        .delete_handler
        .handle(DeleteSessionCommand { session_id })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/v1/sessions/pending - Confirmed sessions awaiting delivery
pub async fn list_pending_sessions(State(handlers): State<SessionHandlers>) -> Response {
    match handlers.pending_handler.handle().await {
        Ok(sessions) => {
            (StatusCode::OK, Json(PendingSessionsResponse::from(sessions))).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

pub(super) fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
}

pub(super) fn handle_session_error(error: SessionError) -> Response {
    match error {
        SessionError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", id.as_str())),
        )
            .into_response(),
        SessionError::Validation(e) => bad_request(e.to_string()),
        SessionError::Conflict { .. } | SessionError::AlreadyReported(_) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(error.to_string())),
        )
            .into_response(),
        SessionError::InvalidState(msg) => bad_request(msg),
        SessionError::Storage(msg) => {
            tracing::error!(error = %msg, "Session storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Session storage failure")),
            )
                .into_response()
        }
    }
}
