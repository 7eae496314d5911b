//! ReviewStatsHandler - Counts over the review queue and past reviews.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::session::SessionError;
use crate::ports::SessionStore;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub awaiting_review: usize,
    pub reviewed: usize,
    /// Latest decision per reviewed session, keyed `scam`, `safe`, `needs_more_data`.
    pub by_decision: BTreeMap<String, usize>,
}

pub struct ReviewStatsHandler {
    store: Arc<dyn SessionStore>,
}

impl ReviewStatsHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<ReviewStats, SessionError> {
        let mut stats = ReviewStats::default();
        for session in self.store.list_for_review().await? {
            if session.awaits_review() {
                stats.awaiting_review += 1;
            }
            if let Some(review) = session.review() {
                stats.reviewed += 1;
                *stats
                    .by_decision
                    .entry(review.decision.to_string())
                    .or_default() += 1;
            }
        }
        Ok(stats)
    }
}
