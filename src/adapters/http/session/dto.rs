//! HTTP DTOs for session operator endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::report::ExtractedIntelligence;
use crate::domain::session::{
    ConversationMetadata, DeliveryFailure, Message, Phase, Review, ReviewDecision, Session,
};

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Full session view for inspection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    pub phase: Phase,
    pub scam_detected: bool,
    pub callback_sent: bool,
    pub total_messages: usize,
    pub messages: Vec<Message>,
    pub extracted_intelligence: ExtractedIntelligence,
    pub agent_notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ConversationMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_failure: Option<DeliveryFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<Review>,
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.session_id().to_string(),
            phase: session.phase(),
            scam_detected: session.phase().is_scam_confirmed(),
            callback_sent: session.callback_sent(),
            total_messages: session.total_messages(),
            messages: session.messages().to_vec(),
            extracted_intelligence: ExtractedIntelligence::from(session.intelligence()),
            agent_notes: session.agent_notes().as_slice().to_vec(),
            metadata: session.metadata().cloned(),
            peak_score: session.peak_score(),
            delivery_failure: session.delivery_failure().cloned(),
            review: session.review().cloned(),
            version: session.version(),
            created_at: session.created_at(),
            updated_at: session.updated_at(),
        }
    }
}

/// One row of the pending-delivery listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingSessionSummary {
    pub session_id: String,
    pub total_messages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_failure: Option<DeliveryFailure>,
    pub updated_at: Timestamp,
}

impl From<&Session> for PendingSessionSummary {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.session_id().to_string(),
            total_messages: session.total_messages(),
            delivery_failure: session.delivery_failure().cloned(),
            updated_at: session.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PendingSessionsResponse {
    pub total: usize,
    pub sessions: Vec<PendingSessionSummary>,
}

impl From<Vec<Session>> for PendingSessionsResponse {
    fn from(sessions: Vec<Session>) -> Self {
        let sessions: Vec<_> = sessions.iter().map(PendingSessionSummary::from).collect();
        Self {
            total: sessions.len(),
            sessions,
        }
    }
}

/// One row of the review queue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewQueueItem {
    pub session_id: String,
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_score: Option<f64>,
    pub total_messages: usize,
    pub agent_notes: Vec<String>,
    /// Set when an earlier review asked for more data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<Review>,
    pub updated_at: Timestamp,
}

impl From<&Session> for ReviewQueueItem {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.session_id().to_string(),
            phase: session.phase(),
            peak_score: session.peak_score(),
            total_messages: session.total_messages(),
            agent_notes: session.agent_notes().as_slice().to_vec(),
            review: session.review().cloned(),
            updated_at: session.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewQueueResponse {
    pub total: usize,
    pub sessions: Vec<ReviewQueueItem>,
}

impl From<Vec<Session>> for ReviewQueueResponse {
    fn from(sessions: Vec<Session>) -> Self {
        let sessions: Vec<_> = sessions.iter().map(ReviewQueueItem::from).collect();
        Self {
            total: sessions.len(),
            sessions,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewQueueParams {
    pub limit: Option<usize>,
}

/// Body of `POST /api/v1/sessions/:id/review`.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkReviewedRequest {
    pub decision: ReviewDecision,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}
