//! HTTP DTOs for the turn endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::session::{ConversationMetadata, Message, MessageTimestamp, Sender};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One message as sent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDto {
    pub sender: Sender,
    pub text: String,
    /// ISO-8601 string or epoch milliseconds, kept verbatim.
    #[serde(default)]
    pub timestamp: Option<MessageTimestamp>,
}

impl MessageDto {
    /// An absent timestamp stays absent.
    pub fn into_message(self) -> Message {
        Message::new(self.sender, self.text, self.timestamp)
    }
}

/// Inbound turn.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoneypotRequest {
    pub session_id: String,
    pub message: MessageDto,
    #[serde(default)]
    pub conversation_history: Vec<MessageDto>,
    #[serde(default)]
    pub metadata: Option<ConversationMetadata>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Reply for the counterpart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HoneypotResponse {
    pub status: String,
    pub reply: String,
}

impl HoneypotResponse {
    pub fn success(reply: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            reply: reply.into(),
        }
    }
}
