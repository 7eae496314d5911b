//! Errors shared by the external collaborators consulted during a turn.

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Failure of a classifier, extractor or reply generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// The collaborator could not be reached or refused the call.
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    /// The call did not finish within its deadline.
    #[error("collaborator timed out after {0}ms")]
    Timeout(u64),

    /// The collaborator answered with something unusable.
    #[error("invalid collaborator response: {0}")]
    InvalidResponse(String),
}

impl CollaboratorError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        CollaboratorError::Unavailable(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        CollaboratorError::InvalidResponse(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CollaboratorError::Timeout(_) => ErrorCode::CollaboratorTimeout,
            _ => ErrorCode::CollaboratorUnavailable,
        }
    }
}
