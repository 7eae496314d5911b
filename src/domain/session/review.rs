//! Operator review of sessions the classifier could not settle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

/// Outcome an operator assigns to a reviewed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Scam,
    Safe,
    /// Left open; the session may be reviewed again later.
    NeedsMoreData,
}

impl ReviewDecision {
    /// True if the decision closes the review.
    pub fn is_final(&self) -> bool {
        !matches!(self, ReviewDecision::NeedsMoreData)
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewDecision::Scam => write!(f, "scam"),
            ReviewDecision::Safe => write!(f, "safe"),
            ReviewDecision::NeedsMoreData => write!(f, "needs_more_data"),
        }
    }
}

/// Recorded operator review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub decision: ReviewDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub reviewed_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decisions_use_snake_case() {
        let d: ReviewDecision = serde_json::from_str("\"needs_more_data\"").unwrap();
        assert_eq!(d, ReviewDecision::NeedsMoreData);
        assert_eq!(serde_json::to_string(&ReviewDecision::Safe).unwrap(), "\"safe\"");
    }

    #[test]
    fn only_needs_more_data_stays_open() {
        assert!(ReviewDecision::Scam.is_final());
        assert!(ReviewDecision::Safe.is_final());
        assert!(!ReviewDecision::NeedsMoreData.is_final());
    }
}
