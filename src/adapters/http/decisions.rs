//! Detection decision log endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::engagement::{Decision, DecisionStats};
use crate::ports::DecisionLog;

const DEFAULT_RECENT_DECISIONS: usize = 50;

#[derive(Clone)]
pub struct DecisionHandlers {
    log: Arc<dyn DecisionLog>,
}

impl DecisionHandlers {
    pub fn new(log: Arc<dyn DecisionLog>) -> Self {
        Self { log }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DecisionParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct DecisionsResponse {
    pub stats: DecisionStats,
    pub recent: Vec<Decision>,
}

/// GET /api/v1/decisions - Statistics and the most recent decisions
pub async fn list_decisions(
    State(handlers): State<DecisionHandlers>,
    Query(params): Query<DecisionParams>,
) -> Json<DecisionsResponse> {
    let limit = params.limit.unwrap_or(DEFAULT_RECENT_DECISIONS);
    Json(DecisionsResponse {
        stats: handlers.log.stats().await,
        recent: handlers.log.recent(limit).await,
    })
}

/// Creates the decision router, to be nested under `/api/v1`.
pub fn decision_routes(handlers: DecisionHandlers) -> Router {
    Router::new()
        .route("/decisions", get(list_decisions))
        .with_state(handlers)
}
