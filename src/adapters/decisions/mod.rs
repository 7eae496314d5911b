//! Decision log adapters.

mod in_memory_decision_log;

pub use in_memory_decision_log::{InMemoryDecisionLog, DEFAULT_DECISION_CAPACITY};
