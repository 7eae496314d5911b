//! Mock reply generator for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::session::Message;
use crate::ports::{CollaboratorError, EngagementContext, ReplyGenerator};

/// Mock generator returning queued replies, then a default.
///
/// Records the context of every call so tests can check what phase the
/// generator was told about.
#[derive(Debug, Clone)]
pub struct MockReplyGenerator {
    responses: Arc<Mutex<VecDeque<Result<String, CollaboratorError>>>>,
    default: String,
    delay: Duration,
    calls: Arc<Mutex<Vec<EngagementContext>>>,
}

impl Default for MockReplyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockReplyGenerator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            default: "Mock reply".to_string(),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(reply.into()));
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

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Contexts passed to the generator, in call order.
    pub fn get_calls(&self) -> Vec<EngagementContext> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplyGenerator for MockReplyGenerator {
    async fn generate(
        &self,
        _history: &[Message],
        _text: &str,
        context: &EngagementContext,
    ) -> Result<String, CollaboratorError> {
        self.calls.lock().unwrap().push(context.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(self.default.clone()))
    }
}
