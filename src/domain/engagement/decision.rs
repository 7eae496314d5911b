//! Per-turn detection decisions and their running statistics.

use serde::Serialize;
use std::collections::BTreeMap;

use super::Classification;
use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::session::{Phase, Session};

/// What the engine concluded about one turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub session_id: SessionId,
    /// Absent when the classifier failed or timed out.
    pub classification: Option<Classification>,
    pub phase_before: Phase,
    pub phase_after: Phase,
    pub hard_evidence: usize,
    pub scammer_turns: usize,
    pub decided_at: Timestamp,
}

impl Decision {
    /// Builds the record from the session as it was before and after the turn.
    pub fn from_turn(before: &Session, after: &Session, classification: Option<Classification>) -> Self {
        Self {
            session_id: after.session_id().clone(),
            classification,
            phase_before: before.phase(),
            phase_after: after.phase(),
            hard_evidence: after.intelligence().hard_evidence_count(),
            scammer_turns: after.scammer_turns(),
            decided_at: Timestamp::now(),
        }
    }

    pub fn phase_changed(&self) -> bool {
        self.phase_before != self.phase_after
    }

    pub fn confirmed(&self) -> bool {
        self.phase_before < Phase::Confirmed && self.phase_after == Phase::Confirmed
    }
}

/// Aggregate view over recorded decisions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionStats {
    pub total: usize,
    /// Decisions per classifier verdict, keyed `benign`, `suspicious`, `scam`.
    pub by_verdict: BTreeMap<String, usize>,
    pub classifier_failures: usize,
    pub phase_changes: usize,
    pub confirmations: usize,
    /// Mean score over classified turns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_score: Option<f64>,
}

impl DecisionStats {
    pub fn from_decisions<'a>(decisions: impl IntoIterator<Item = &'a Decision>) -> Self {
        let mut stats = DecisionStats::default();
        let mut score_sum = 0.0;
        let mut scored = 0usize;

        for decision in decisions {
            stats.total += 1;
            match &decision.classification {
                Some(c) => {
                    *stats.by_verdict.entry(c.verdict.to_string()).or_default() += 1;
                    if c.score.is_finite() {
                        score_sum += c.score;
                        scored += 1;
                    }
                }
                None => stats.classifier_failures += 1,
            }
            if decision.phase_changed() {
                stats.phase_changes += 1;
            }
            if decision.confirmed() {
                stats.confirmations += 1;
            }
        }

        stats.mean_score = (scored > 0).then(|| score_sum / scored as f64);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::engagement::Verdict;

    fn decision(classification: Option<Classification>, before: Phase, after: Phase) -> Decision {
        Decision {
            session_id: SessionId::new("d-1").unwrap(),
            classification,
            phase_before: before,
            phase_after: after,
            hard_evidence: 0,
            scammer_turns: 1,
            decided_at: Timestamp::now(),
        }
    }

    #[test]
    fn stats_count_verdicts_failures_and_confirmations() {
        let decisions = vec![
            decision(
                Some(Classification::new(0.2, Verdict::Benign)),
                Phase::Suspected,
                Phase::Suspected,
            ),
            decision(
                Some(Classification::new(0.4, Verdict::Suspicious)),
                Phase::Suspected,
                Phase::Engaging,
            ),
            decision(None, Phase::Engaging, Phase::Engaging),
            decision(
                Some(Classification::new(0.9, Verdict::Scam)),
                Phase::Engaging,
                Phase::Confirmed,
            ),
        ];

        let stats = DecisionStats::from_decisions(&decisions);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.classifier_failures, 1);
        assert_eq!(stats.phase_changes, 2);
        assert_eq!(stats.confirmations, 1);
        assert_eq!(stats.by_verdict.get("scam"), Some(&1));
        assert_eq!(stats.by_verdict.get("benign"), Some(&1));
        let mean = stats.mean_score.unwrap();
        assert!((mean - 0.5).abs() < 1e-9);
    }

    #[test]
    fn empty_stats_have_no_mean() {
        let stats = DecisionStats::from_decisions(&[]);
        assert_eq!(stats.total, 0);
        assert!(stats.mean_score.is_none());
    }
}
