//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `session` - Conversation record, messages and phase
//! - `intelligence` - Extracted facts, normalization and the aggregator
//! - `engagement` - Classifier signal, engagement policy and phase evaluation
//! - `report` - Final report payload

pub mod engagement;
pub mod foundation;
pub mod intelligence;
pub mod report;
pub mod session;
