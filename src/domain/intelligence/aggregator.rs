//! Merges per-turn facts into a session's cumulative evidence.

use super::{notes, AgentNotes, ExtractedFacts, Intelligence};
use crate::domain::session::Session;

/// What a merge changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// New items across all five sets.
    pub added_evidence: usize,
    /// New non-keyword items.
    pub added_hard_evidence: usize,
    /// New agent notes, supplied or derived.
    pub added_notes: usize,
}

impl MergeSummary {
    /// True if the merge left the session untouched.
    pub fn is_noop(&self) -> bool {
        self.added_evidence == 0 && self.added_notes == 0
    }
}

/// Folds extracted facts into the evidence sets and agent notes.
///
/// Merging is idempotent: applying the same facts twice leaves every set and
/// the notes exactly as after the first application.
#[derive(Debug, Clone)]
pub struct IntelligenceAggregator {
    derive_notes: bool,
}

impl Default for IntelligenceAggregator {
    fn default() -> Self {
        Self { derive_notes: true }
    }
}

impl IntelligenceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables tactic and category notes derived from keywords.
    pub fn without_derived_notes(mut self) -> Self {
        self.derive_notes = false;
        self
    }

    /// Merges facts into the session.
    pub fn merge(&self, session: &mut Session, facts: &ExtractedFacts) -> MergeSummary {
        let (intelligence, agent_notes) = session.evidence_mut();
        self.merge_into(intelligence, agent_notes, facts)
    }

    /// Merges facts into bare evidence and notes.
    pub fn merge_into(
        &self,
        intelligence: &mut Intelligence,
        agent_notes: &mut AgentNotes,
        facts: &ExtractedFacts,
    ) -> MergeSummary {
        let mut summary = MergeSummary::default();

        for (kind, raw) in facts.iter() {
            if intelligence.insert(kind, raw) {
                summary.added_evidence += 1;
                if kind.is_hard() {
                    summary.added_hard_evidence += 1;
                }
            }
        }

        for note in &facts.notes {
            if agent_notes.push_unique(note.trim()) {
                summary.added_notes += 1;
            }
        }

        if self.derive_notes {
            let keywords = intelligence.suspicious_keywords();
            // The first category assigned to a session sticks.
            let categorized = agent_notes
                .as_slice()
                .iter()
                .any(|n| notes::is_category_note(n));
            let category = if categorized {
                None
            } else {
                notes::scam_category(keywords).map(notes::category_note)
            };
            let derived = category.into_iter().chain(notes::tactic_notes(keywords));
            for note in derived {
                if agent_notes.push_unique(note) {
                    summary.added_notes += 1;
                }
            }
        }

        summary
    }
}
