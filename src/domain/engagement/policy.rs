//! Thresholds and the evidence predicate that drive phase changes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Injectable engagement policy.
///
/// A session is confirmed when the classifier gives a strong signal and the
/// session has either enough hard evidence or enough counterpart turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementPolicy {
    /// Score at or above which a turn is suspicious.
    pub suspicion_threshold: f64,
    /// Score at or above which a turn is a strong signal.
    pub confirmation_threshold: f64,
    /// Hard evidence items that satisfy the evidence half of the predicate.
    pub min_hard_evidence: usize,
    /// Counterpart turns that satisfy the evidence half on their own.
    pub confirm_after_turns: Option<usize>,
}

impl Default for EngagementPolicy {
    fn default() -> Self {
        Self {
            suspicion_threshold: 0.3,
            confirmation_threshold: 0.6,
            min_hard_evidence: 1,
            confirm_after_turns: Some(3),
        }
    }
}

impl EngagementPolicy {
    /// Checks that thresholds are finite and ordered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.suspicion_threshold.is_finite() {
            return Err(ValidationError::invalid_format(
                "suspicion_threshold",
                "must be a finite number",
            ));
        }
        if !self.confirmation_threshold.is_finite() {
            return Err(ValidationError::invalid_format(
                "confirmation_threshold",
                "must be a finite number",
            ));
        }
        if self.suspicion_threshold > self.confirmation_threshold {
            return Err(ValidationError::invalid_format(
                "suspicion_threshold",
                "must not exceed confirmation_threshold",
            ));
        }
        if self.confirm_after_turns == Some(0) {
            return Err(ValidationError::invalid_format(
                "confirm_after_turns",
                "must be at least 1 when set",
            ));
        }
        Ok(())
    }
}
