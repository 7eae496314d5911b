//! Conversation messages as exchanged with the counterpart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who sent a message.
///
/// `User` is the persona the honeypot plays; `Scammer` is the counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Scammer,
    User,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::Scammer => write!(f, "scammer"),
            Sender::User => write!(f, "user"),
        }
    }
}

/// Caller-supplied message timestamp.
///
/// Clients send either epoch milliseconds or an ISO-8601 string. The value is
/// kept verbatim: it participates in replay detection but never in ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageTimestamp {
    EpochMillis(i64),
    Text(String),
}

impl fmt::Display for MessageTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageTimestamp::EpochMillis(ms) => write!(f, "{}", ms),
            MessageTimestamp::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One message of a conversation. Immutable once stored.
///
/// A message sent without a timestamp keeps `None`, so an identical
/// redelivery still compares equal to the stored copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    #[serde(default)]
    pub timestamp: Option<MessageTimestamp>,
}

impl Message {
    /// Creates a new message.
    pub fn new(
        sender: Sender,
        text: impl Into<String>,
        timestamp: impl Into<Option<MessageTimestamp>>,
    ) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Creates a message from the counterpart.
    pub fn from_scammer(text: impl Into<String>, timestamp: impl Into<Option<MessageTimestamp>>) -> Self {
        Self::new(Sender::Scammer, text, timestamp)
    }

    /// Creates a message from the honeypot persona.
    pub fn from_user(text: impl Into<String>, timestamp: impl Into<Option<MessageTimestamp>>) -> Self {
        Self::new(Sender::User, text, timestamp)
    }
}

/// Channel details reported alongside a turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMetadata {
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::Scammer).unwrap(), "\"scammer\"");
        let sender: Sender = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(sender, Sender::User);
    }

    #[test]
    fn unknown_sender_is_rejected() {
        assert!(serde_json::from_str::<Sender>("\"bot\"").is_err());
    }

    #[test]
    fn timestamp_accepts_millis_and_strings() {
        let ms: MessageTimestamp = serde_json::from_str("1770005528731").unwrap();
        assert_eq!(ms, MessageTimestamp::EpochMillis(1770005528731));

        let iso: MessageTimestamp = serde_json::from_str("\"2026-01-21T10:15:30Z\"").unwrap();
        assert_eq!(iso, MessageTimestamp::Text("2026-01-21T10:15:30Z".to_string()));
    }

    #[test]
    fn timestamp_round_trips_verbatim() {
        let iso = MessageTimestamp::Text("2026-01-21T10:15:30.000+05:30".to_string());
        let json = serde_json::to_string(&iso).unwrap();
        assert_eq!(json, "\"2026-01-21T10:15:30.000+05:30\"");
    }

    #[test]
    fn message_equality_covers_all_three_fields() {
        let a = Message::from_scammer("hello", MessageTimestamp::EpochMillis(1));
        let b = Message::from_scammer("hello", MessageTimestamp::EpochMillis(2));
        let c = Message::from_user("hello", MessageTimestamp::EpochMillis(1));

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn untimed_messages_compare_equal() {
        let a = Message::from_scammer("Send OTP now", None);
        let b = Message::from_scammer("Send OTP now", None);
        let timed = Message::from_scammer("Send OTP now", MessageTimestamp::EpochMillis(1));

        assert_eq!(a, b);
        assert_ne!(a, timed);
    }
}
