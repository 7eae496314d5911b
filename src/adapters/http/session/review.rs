//! Review queue endpoints, merged into the session router.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::application::handlers::review::{
    ListReviewQueueHandler, MarkReviewedCommand, MarkReviewedHandler, ReviewStatsHandler,
    DEFAULT_REVIEW_QUEUE_LIMIT,
};
use crate::domain::foundation::SessionId;
use crate::domain::session::SessionError;

use super::dto::{
    ErrorResponse, MarkReviewedRequest, ReviewQueueParams, ReviewQueueResponse, SessionResponse,
};
use super::handlers::{bad_request, handle_session_error};

#[derive(Clone)]
pub struct ReviewHandlers {
    queue_handler: Arc<ListReviewQueueHandler>,
    mark_handler: Arc<MarkReviewedHandler>,
    stats_handler: Arc<ReviewStatsHandler>,
}

impl ReviewHandlers {
    pub fn new(
        queue_handler: Arc<ListReviewQueueHandler>,
        mark_handler: Arc<MarkReviewedHandler>,
        stats_handler: Arc<ReviewStatsHandler>,
    ) -> Self {
        Self {
            queue_handler,
            mark_handler,
            stats_handler,
        }
    }
}

/// GET /api/v1/sessions/review - Engaging sessions awaiting a decision
pub async fn list_review_queue(
    State(handlers): State<ReviewHandlers>,
    Query(params): Query<ReviewQueueParams>,
) -> Response {
    let limit = params.limit.unwrap_or(DEFAULT_REVIEW_QUEUE_LIMIT);
    match handlers.queue_handler.handle(limit).await {
        Ok(sessions) => (StatusCode::OK, Json(ReviewQueueResponse::from(sessions))).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// GET /api/v1/sessions/review/stats
pub async fn review_stats(State(handlers): State<ReviewHandlers>) -> Response {
    match handlers.stats_handler.handle().await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/v1/sessions/:id/review - Record an operator decision
pub async fn mark_reviewed(
    State(handlers): State<ReviewHandlers>,
    Path(session_id): Path<String>,
    Json(request): Json<MarkReviewedRequest>,
) -> Response {
    let session_id = match SessionId::new(session_id) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    let cmd = MarkReviewedCommand {
        session_id,
        decision: request.decision,
        notes: request.notes,
    };
    match handlers.mark_handler.handle(cmd).await {
        Ok(session) => (StatusCode::OK, Json(SessionResponse::from(&session))).into_response(),
        // A final review already exists
        Err(SessionError::InvalidState(msg)) => {
            (StatusCode::CONFLICT, Json(ErrorResponse::conflict(msg))).into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

/// Creates the review router, merged into the `/api/v1/sessions` nest.
pub fn review_routes(handlers: ReviewHandlers) -> Router {
    Router::new()
        .route("/review", get(list_review_queue))
        .route("/review/stats", get(review_stats))
        .route("/:id/review", post(mark_reviewed))
        .with_state(handlers)
}
