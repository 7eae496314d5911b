//! ListReviewQueueHandler - Sessions awaiting an operator decision.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::domain::session::{Session, SessionError};
use crate::ports::SessionStore;

pub const DEFAULT_REVIEW_QUEUE_LIMIT: usize = 50;

/// Handler for the review queue.
pub struct ListReviewQueueHandler {
    store: Arc<dyn SessionStore>,
}

impl ListReviewQueueHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Highest peak score first, at most `limit` sessions.
    pub async fn handle(&self, limit: usize) -> Result<Vec<Session>, SessionError> {
        let mut queue: Vec<Session> = self
            .store
            .list_for_review()
            .await?
            .into_iter()
            .filter(Session::awaits_review)
            .collect();
        queue.sort_by(|a, b| {
            b.peak_score()
                .partial_cmp(&a.peak_score())
                .unwrap_or(Ordering::Equal)
        });
        queue.truncate(limit);
        Ok(queue)
    }
}
