//! Session domain module.
//!
//! A session tracks one conversation with a counterpart across independent,
//! possibly concurrent and duplicated requests: its messages, its phase, the
//! evidence gathered so far, and whether the final report went out.

mod aggregate;
mod errors;
mod message;
mod phase;
mod review;

pub use aggregate::{DeliveryFailure, Session};
pub use errors::SessionError;
pub use message::{ConversationMetadata, Message, MessageTimestamp, Sender};
pub use phase::Phase;
pub use review::{Review, ReviewDecision};
