//! Mock intelligence extractor for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::intelligence::ExtractedFacts;
use crate::ports::{CollaboratorError, IntelligenceExtractor};

/// Mock extractor returning queued facts, then a default.
#[derive(Debug, Clone)]
pub struct MockIntelligenceExtractor {
    responses: Arc<Mutex<VecDeque<Result<ExtractedFacts, CollaboratorError>>>>,
    default: ExtractedFacts,
    delay: Duration,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockIntelligenceExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockIntelligenceExtractor {
    /// Creates a mock that extracts nothing.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            default: ExtractedFacts::default(),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sets the facts returned once the queue is empty.
    pub fn with_default(mut self, facts: ExtractedFacts) -> Self {
        self.default = facts;
        self
    }

    /// Queues facts for the next call.
    pub fn with_facts(self, facts: ExtractedFacts) -> Self {
        self.responses.lock().unwrap().push_back(Ok(facts));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: CollaboratorError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl IntelligenceExtractor for MockIntelligenceExtractor {
    async fn extract(&self, text: &str) -> Result<ExtractedFacts, CollaboratorError> {
        self.calls.lock().unwrap().push(text.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(self.default.clone()))
    }
}
