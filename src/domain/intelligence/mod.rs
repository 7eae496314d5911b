//! Intelligence module.
//!
//! Extracted facts, their canonical forms, and the aggregator that folds them
//! into a session's cumulative evidence.

mod aggregator;
mod evidence;
mod facts;
pub mod normalize;
mod notes;

pub use aggregator::{IntelligenceAggregator, MergeSummary};
pub use evidence::{AgentNotes, EvidenceKind, Intelligence};
pub use facts::ExtractedFacts;
