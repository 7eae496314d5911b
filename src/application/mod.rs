//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    // Turn handling
    ConversationCoordinator, ProcessTurnCommand, ProcessTurnResult,
    // Report delivery
    CallbackDispatcher, DispatchOutcome, RetryPolicy,
    // Operator handlers
    DeleteSessionCommand, DeleteSessionHandler, GetSessionHandler, GetSessionQuery,
    ListPendingSessionsHandler,
    // Review queue
    ListReviewQueueHandler, MarkReviewedCommand, MarkReviewedHandler, ReviewStats,
    ReviewStatsHandler,
};
