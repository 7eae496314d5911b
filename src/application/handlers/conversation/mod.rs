//! Conversation turn handling.

mod process_turn;

pub use process_turn::{
    ConversationCoordinator, ProcessTurnCommand, ProcessTurnResult, DEFAULT_COLLABORATOR_TIMEOUT,
};
