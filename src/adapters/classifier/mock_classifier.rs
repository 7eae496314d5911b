//! Mock scam classifier for testing.
//!
//! Returns queued classifications in order, then a fixed default. Supports
//! error injection, simulated latency and call recording.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::engagement::{Classification, Verdict};
use crate::domain::session::Message;
use crate::ports::{CollaboratorError, ScamClassifier};

/// Mock classifier for testing.
#[derive(Debug, Clone)]
pub struct MockScamClassifier {
    responses: Arc<Mutex<VecDeque<Result<Classification, CollaboratorError>>>>,
    default: Classification,
    delay: Duration,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockScamClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockScamClassifier {
    /// Creates a mock that classifies everything as benign.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            default: Classification::benign(),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a mock that always reports a scam with full confidence.
    pub fn always_scam() -> Self {
        Self::new().with_default(Classification::new(1.0, Verdict::Scam))
    }

    /// Sets the classification returned once the queue is empty.
    pub fn with_default(mut self, classification: Classification) -> Self {
        self.default = classification;
        self
    }

    /// Queues a classification.
    pub fn with_classification(self, score: f64, verdict: Verdict) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(Classification::new(score, verdict)));
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

    /// Returns the texts classified so far.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScamClassifier for MockScamClassifier {
    async fn classify(
        &self,
        text: &str,
        _history: &[Message],
    ) -> Result<Classification, CollaboratorError> {
        self.calls.lock().unwrap().push(text.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(self.default))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_queue_then_default() {
        let mock = MockScamClassifier::new()
            .with_classification(0.9, Verdict::Scam)
            .with_error(CollaboratorError::unavailable("down"));

        assert_eq!(mock.classify("a", &[]).await.unwrap().verdict, Verdict::Scam);
        assert!(mock.classify("b", &[]).await.is_err());
        assert_eq!(mock.classify("c", &[]).await.unwrap(), Classification::benign());
        assert_eq!(mock.get_calls(), vec!["a", "b", "c"]);
    }
}
