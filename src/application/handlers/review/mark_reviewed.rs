//! MarkReviewedHandler - Records an operator decision on a session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{ReviewDecision, Session, SessionError};
use crate::ports::SessionStore;

/// Command to record a review.
#[derive(Debug, Clone)]
pub struct MarkReviewedCommand {
    pub session_id: SessionId,
    pub decision: ReviewDecision,
    pub notes: Option<String>,
}

/// Handler for recording reviews.
pub struct MarkReviewedHandler {
    store: Arc<dyn SessionStore>,
}

impl MarkReviewedHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Records the review and returns the updated session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session has this id
    /// - `InvalidState` if a final review is already recorded
    pub async fn handle(&self, cmd: MarkReviewedCommand) -> Result<Session, SessionError> {
        let record = |s: &mut Session| -> Result<(), SessionError> {
            s.record_review(cmd.decision, cmd.notes.clone())
        };
        let session = self.store.update(&cmd.session_id, &record).await?;

        tracing::info!(
            session_id = %cmd.session_id,
            decision = %cmd.decision,
            phase = %session.phase(),
            peak_score = ?session.peak_score(),
            "Session reviewed"
        );
        Ok(session)
    }
}
