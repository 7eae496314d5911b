//! Engagement module.
//!
//! Classifier signals, the injectable policy, the phase state machine that
//! turns both into phase changes, and the per-turn decision record.

mod decision;
mod machine;
mod policy;
mod signal;

pub use decision::{Decision, DecisionStats};
pub use machine::{PhaseChange, PhaseStateMachine};
pub use policy::EngagementPolicy;
pub use signal::{Classification, Verdict};
