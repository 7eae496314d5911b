//! Reply Generator Port - Produces the persona's next message.

use async_trait::async_trait;

use super::CollaboratorError;
use crate::domain::session::{ConversationMetadata, Message, Phase};

/// Internal context handed to the generator. Never shown to the counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementContext {
    /// Phase after this turn's evaluation.
    pub phase: Phase,
    /// Messages stored for the session, including this turn's.
    pub turn_count: usize,
    pub metadata: Option<ConversationMetadata>,
}

impl EngagementContext {
    pub fn new(phase: Phase, turn_count: usize) -> Self {
        Self {
            phase,
            turn_count,
            metadata: None,
        }
    }
}

/// Port for reply generation.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Generates a reply to `text` given the prior `history`.
    async fn generate(
        &self,
        history: &[Message],
        text: &str,
        context: &EngagementContext,
    ) -> Result<String, CollaboratorError>;
}
