//! Classifier output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical judgement of a message. Ordered `Benign < Suspicious < Scam`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Benign,
    Suspicious,
    Scam,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Benign => write!(f, "benign"),
            Verdict::Suspicious => write!(f, "suspicious"),
            Verdict::Scam => write!(f, "scam"),
        }
    }
}

/// Score and verdict for one turn. No score scale is assumed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub score: f64,
    pub verdict: Verdict,
}

impl Classification {
    pub fn new(score: f64, verdict: Verdict) -> Self {
        Self { score, verdict }
    }

    pub fn benign() -> Self {
        Self::new(0.0, Verdict::Benign)
    }

    /// The score, or `None` when it is not a usable number.
    pub fn finite_score(&self) -> Option<f64> {
        self.score.is_finite().then_some(self.score)
    }
}
