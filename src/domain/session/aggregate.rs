//! Session aggregate entity.
//!
//! A session is the durable record of one conversation with a counterpart.
//! It is created lazily on first contact and mutated once per turn by the
//! conversation coordinator and once more when the final report lands.
//!
//! # Invariants
//!
//! - `total_messages()` always equals `messages().len()`
//! - `messages` are append-only and never rewritten
//! - `phase` never moves backward
//! - `callback_sent` flips false → true exactly once, only from `Confirmed`
//! - evidence sets only grow
//!
//! Persistence-only concerns (`version`, `updated_at`) are maintained by the
//! store through [`Session::commit`].

use serde::{Deserialize, Serialize};

use super::{ConversationMetadata, Message, Phase, Review, ReviewDecision, SessionError, Sender};
use crate::domain::foundation::{SessionId, StateMachine, Timestamp};
use crate::domain::intelligence::{AgentNotes, Intelligence};

/// Last exhausted delivery attempt sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFailure {
    pub attempts: u32,
    pub last_error: String,
    pub failed_at: Timestamp,
}

/// Session aggregate - one conversation and everything learned from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    session_id: SessionId,
    messages: Vec<Message>,
    phase: Phase,
    intelligence: Intelligence,
    agent_notes: AgentNotes,
    callback_sent: bool,
    /// Optimistic-concurrency token, bumped on every committed write.
    version: u64,
    metadata: Option<ConversationMetadata>,
    /// Highest classifier score seen so far.
    peak_score: Option<f64>,
    delivery_failure: Option<DeliveryFailure>,
    #[serde(default)]
    review: Option<Review>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    /// Creates a fresh session in `Suspected` with no messages and version 0.
    pub fn new(session_id: SessionId) -> Self {
        let now = Timestamp::now();
        Self {
            session_id,
            messages: Vec::new(),
            phase: Phase::Suspected,
            intelligence: Intelligence::default(),
            agent_notes: AgentNotes::default(),
            callback_sent: false,
            version: 0,
            metadata: None,
            peak_score: None,
            delivery_failure: None,
            review: None,
            created_at: now,
            updated_at: now,
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Accessors
    // ════════════════════════════════════════════════════════════════════════

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn intelligence(&self) -> &Intelligence {
        &self.intelligence
    }

    pub fn agent_notes(&self) -> &AgentNotes {
        &self.agent_notes
    }

    pub fn callback_sent(&self) -> bool {
        self.callback_sent
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn metadata(&self) -> Option<&ConversationMetadata> {
        self.metadata.as_ref()
    }

    pub fn peak_score(&self) -> Option<f64> {
        self.peak_score
    }

    pub fn delivery_failure(&self) -> Option<&DeliveryFailure> {
        self.delivery_failure.as_ref()
    }

    pub fn review(&self) -> Option<&Review> {
        self.review.as_ref()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Number of stored messages.
    pub fn total_messages(&self) -> usize {
        self.messages.len()
    }

    /// Number of stored messages sent by the counterpart.
    pub fn scammer_turns(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.sender == Sender::Scammer)
            .count()
    }

    /// Confirmed but not yet delivered.
    pub fn is_pending_delivery(&self) -> bool {
        self.phase == Phase::Confirmed && !self.callback_sent
    }

    /// Suspicious but never confirmed, and no final review recorded.
    pub fn awaits_review(&self) -> bool {
        self.phase == Phase::Engaging && !self.review.as_ref().is_some_and(|r| r.decision.is_final())
    }

    // ════════════════════════════════════════════════════════════════════════
    // Conversation
    // ════════════════════════════════════════════════════════════════════════

    /// Appends the part of a client-supplied history the store has not seen.
    ///
    /// The history is trusted as a prefix-extension of the stored messages:
    /// only entries past the stored length are appended, in order. Returns the
    /// number of messages appended.
    pub fn reconcile_history(&mut self, history: &[Message]) -> usize {
        let stored = self.messages.len();
        if history.len() <= stored {
            return 0;
        }
        self.messages.extend_from_slice(&history[stored..]);
        history.len() - stored
    }

    /// Appends the turn's incoming message unless it replays the last one.
    ///
    /// Returns true if the message was appended.
    pub fn append_incoming(&mut self, message: Message) -> bool {
        if self.messages.last() == Some(&message) {
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Records channel details the first time they are supplied.
    pub fn set_metadata_if_absent(&mut self, metadata: Option<ConversationMetadata>) {
        if self.metadata.is_none() {
            self.metadata = metadata;
        }
    }

    /// Tracks the highest classifier score. Non-finite scores are ignored.
    pub fn observe_score(&mut self, score: f64) {
        if !score.is_finite() {
            return;
        }
        self.peak_score = Some(match self.peak_score {
            Some(peak) if peak >= score => peak,
            _ => score,
        });
    }

    pub(crate) fn evidence_mut(&mut self) -> (&mut Intelligence, &mut AgentNotes) {
        (&mut self.intelligence, &mut self.agent_notes)
    }

    // ════════════════════════════════════════════════════════════════════════
    // Lifecycle
    // ════════════════════════════════════════════════════════════════════════

    /// Moves the phase forward when the transition is allowed.
    ///
    /// `Reported` is never reachable here; only [`Session::mark_reported`]
    /// enters it. Returns the phase after the call.
    pub(crate) fn advance_phase(&mut self, target: Phase) -> Phase {
        if target != Phase::Reported {
            self.phase = self.phase.advance_to(target);
        }
        self.phase
    }

    /// Commits a successful delivery: `callback_sent = true`, phase `Reported`.
    ///
    /// # Errors
    ///
    /// - `AlreadyReported` if the report was already committed
    /// - `InvalidState` if the session is not `Confirmed`
    pub fn mark_reported(&mut self) -> Result<(), SessionError> {
        if self.callback_sent {
            return Err(SessionError::AlreadyReported(self.session_id.clone()));
        }
        self.phase = self.phase.transition_to(Phase::Reported).map_err(|_| {
            SessionError::invalid_state(format!(
                "cannot report session {} from phase {}",
                self.session_id, self.phase
            ))
        })?;
        self.callback_sent = true;
        self.delivery_failure = None;
        Ok(())
    }

    /// Records an exhausted delivery. Ignored once reported.
    pub fn record_delivery_failure(&mut self, attempts: u32, last_error: impl Into<String>) {
        if self.callback_sent {
            return;
        }
        self.delivery_failure = Some(DeliveryFailure {
            attempts,
            last_error: last_error.into(),
            failed_at: Timestamp::now(),
        });
    }

    /// Records an operator review. A `NeedsMoreData` review may be replaced;
    /// a final one may not. The phase is left alone.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if a final review is already recorded
    pub fn record_review(
        &mut self,
        decision: ReviewDecision,
        notes: Option<String>,
    ) -> Result<(), SessionError> {
        if let Some(existing) = self.review.as_ref().filter(|r| r.decision.is_final()) {
            return Err(SessionError::invalid_state(format!(
                "session {} was already reviewed as {}",
                self.session_id, existing.decision
            )));
        }
        self.review = Some(Review {
            decision,
            notes: notes.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
            reviewed_at: Timestamp::now(),
        });
        Ok(())
    }

    /// Stamps a write: bumps the version and the update time.
    pub(crate) fn commit(&mut self) {
        self.version += 1;
        self.updated_at = Timestamp::now();
    }
}
