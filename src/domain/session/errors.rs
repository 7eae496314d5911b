//! Session-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SessionId, ValidationError};

/// Session-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Session was not found.
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    /// Compare-and-swap retry budget exhausted.
    #[error("Update conflict on session {session_id} after {attempts} attempts")]
    Conflict { session_id: SessionId, attempts: u32 },

    /// The final report was already committed for this session.
    #[error("Report already committed for session {0}")]
    AlreadyReported(SessionId),

    /// Invalid state for operation.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage backend failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SessionError {
    pub fn not_found(id: &SessionId) -> Self {
        SessionError::NotFound(id.clone())
    }
    pub fn conflict(id: &SessionId, attempts: u32) -> Self {
        SessionError::Conflict {
            session_id: id.clone(),
            attempts,
        }
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        SessionError::InvalidState(message.into())
    }
    pub fn storage(message: impl Into<String>) -> Self {
        SessionError::Storage(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::NotFound(_) => ErrorCode::SessionNotFound,
            SessionError::Conflict { .. } => ErrorCode::UpdateConflict,
            SessionError::AlreadyReported(_) => ErrorCode::AlreadyReported,
            SessionError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SessionError::Validation(_) => ErrorCode::ValidationFailed,
            SessionError::Storage(_) => ErrorCode::StorageError,
        }
    }
}
