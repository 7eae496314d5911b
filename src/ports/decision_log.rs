//! Decision Log Port - Keeps the engine's per-turn detection decisions.

use async_trait::async_trait;

use crate::domain::engagement::{Decision, DecisionStats};

/// Port for recording detection decisions.
///
/// Recording never fails the turn; implementations swallow their own errors.
#[async_trait]
pub trait DecisionLog: Send + Sync {
    async fn record(&self, decision: Decision);

    /// Most recent decisions, newest first.
    async fn recent(&self, limit: usize) -> Vec<Decision>;

    /// Statistics over every retained decision.
    async fn stats(&self) -> DecisionStats;
}
