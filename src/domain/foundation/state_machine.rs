//! State machine trait for lifecycle enums.
//!
//! Provides a consistent interface for validating transitions. Lifecycles in
//! this crate are monotonic: besides the strict `transition_to`, the trait
//! offers `advance_to`, which treats any transition the machine does not
//! allow as a no-op and keeps the current state.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for Phase {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Suspected, Engaging) | (Engaging, Confirmed))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> { /* ... */ }
/// }
///
/// let next = phase.advance_to(Phase::Confirmed);
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Moves to `target` when allowed, otherwise stays put.
    fn advance_to(&self, target: Self) -> Self {
        if self.can_transition_to(&target) {
            target
        } else {
            *self
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
