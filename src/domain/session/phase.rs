//! Engagement phase of a session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle position of a session.
///
/// Ordered `Suspected < Engaging < Confirmed < Reported`. A session only ever
/// moves forward; `Confirmed → Reported` is reserved for successful report
/// delivery and is never driven by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// First contact, nothing conclusive yet.
    Suspected,
    /// Suspicion crossed the low threshold; keep the counterpart talking.
    Engaging,
    /// Confirmation predicate met; a report is owed.
    Confirmed,
    /// Report delivered. Terminal.
    Reported,
}

impl Phase {
    /// Returns true once the session has been judged malicious.
    pub fn is_scam_confirmed(&self) -> bool {
        *self >= Phase::Confirmed
    }

    /// Short label for logs and operator views.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Suspected => "suspected",
            Phase::Engaging => "engaging",
            Phase::Confirmed => "confirmed",
            Phase::Reported => "reported",
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Suspected
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl StateMachine for Phase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use Phase::*;
        matches!(
            (self, target),
            (Suspected, Engaging)
                | (Suspected, Confirmed)
                | (Engaging, Confirmed)
                | (Confirmed, Reported)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use Phase::*;
        match self {
            Suspected => vec![Engaging, Confirmed],
            Engaging => vec![Confirmed],
            Confirmed => vec![Reported],
            Reported => vec![],
        }
    }
}
