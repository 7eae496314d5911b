//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Upper bound on caller-supplied session identifiers.
const MAX_SESSION_ID_LEN: usize = 256;

/// Opaque identifier for one conversation, chosen by the caller.
///
/// Session ids arrive on the wire as arbitrary strings and are kept exactly
/// as sent. They must be non-empty and bounded, with no control characters
/// and no surrounding whitespace, so two distinct keys never share a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    /// Creates a SessionId after validating the raw value.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("session_id"));
        }
        if value.trim().len() != value.len() {
            return Err(ValidationError::invalid_format(
                "session_id",
                "has leading or trailing whitespace",
            ));
        }
        if value.len() > MAX_SESSION_ID_LEN {
            return Err(ValidationError::too_long(
                "session_id",
                MAX_SESSION_ID_LEN,
                value.len(),
            ));
        }
        if value.chars().any(char::is_control) {
            return Err(ValidationError::invalid_format(
                "session_id",
                "contains control characters",
            ));
        }
        Ok(Self(value))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SessionId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

/// Correlation id for one processed turn, used only in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(Uuid);

impl TurnId {
    /// Creates a new random TurnId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
