//! In-memory decision log.
//!
//! Keeps the most recent decisions in a bounded ring; the oldest entry is
//! dropped once the capacity is reached. Statistics cover retained entries
//! only. Nothing survives a restart; the tracing event emitted per turn is
//! the durable trail.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::engagement::{Decision, DecisionStats};
use crate::ports::DecisionLog;

pub const DEFAULT_DECISION_CAPACITY: usize = 1000;

/// Bounded, thread-safe decision log.
#[derive(Debug, Clone)]
pub struct InMemoryDecisionLog {
    entries: Arc<Mutex<VecDeque<Decision>>>,
    capacity: usize,
}

impl InMemoryDecisionLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_DECISION_CAPACITY)
    }

    /// Zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity.min(1024)))),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> MutexGuard<'_, VecDeque<Decision>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for InMemoryDecisionLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DecisionLog for InMemoryDecisionLog {
    async fn record(&self, decision: Decision) {
        let mut entries = self.entries();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(decision);
    }

    async fn recent(&self, limit: usize) -> Vec<Decision> {
        self.entries().iter().rev().take(limit).cloned().collect()
    }

    async fn stats(&self) -> DecisionStats {
        DecisionStats::from_decisions(self.entries().iter())
    }
}
