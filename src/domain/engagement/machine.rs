//! Phase evaluation per turn.

use super::{Classification, EngagementPolicy, Verdict};
use crate::domain::session::{Phase, Session};

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: Phase,
    pub to: Phase,
}

impl PhaseChange {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Drives a session from suspicion to confirmation.
///
/// Never produces `Reported`; that transition belongs to report delivery.
/// Evaluations that would lower the phase leave it unchanged.
#[derive(Debug, Clone, Default)]
pub struct PhaseStateMachine {
    policy: EngagementPolicy,
}

impl PhaseStateMachine {
    pub fn new(policy: EngagementPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &EngagementPolicy {
        &self.policy
    }

    /// Phase the session should move to, given this turn's signal and the
    /// evidence accumulated so far.
    pub fn evaluate(&self, session: &Session, signal: &Classification) -> Phase {
        let current = session.phase();
        if current.is_scam_confirmed() {
            return current;
        }

        let score = signal.finite_score();
        let suspicious = score.map_or(false, |s| s >= self.policy.suspicion_threshold)
            || signal.verdict >= Verdict::Suspicious;
        let strong = score.map_or(false, |s| s >= self.policy.confirmation_threshold)
            || signal.verdict == Verdict::Scam;

        if strong && self.evidence_sufficient(session) {
            Phase::Confirmed
        } else if suspicious {
            Phase::Engaging
        } else {
            current
        }
    }

    /// Evaluates and applies the result to the session.
    pub fn apply(&self, session: &mut Session, signal: &Classification) -> PhaseChange {
        let from = session.phase();
        let target = self.evaluate(session, signal);
        let to = session.advance_phase(target);
        PhaseChange { from, to }
    }

    fn evidence_sufficient(&self, session: &Session) -> bool {
        session.intelligence().hard_evidence_count() >= self.policy.min_hard_evidence
            || self
                .policy
                .confirm_after_turns
                .map_or(false, |turns| session.scammer_turns() >= turns)
    }
}
