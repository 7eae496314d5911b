//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod conversation;
pub mod report;
pub mod review;
pub mod session;

pub use conversation::{ConversationCoordinator, ProcessTurnCommand, ProcessTurnResult};
pub use report::{CallbackDispatcher, DispatchOutcome, RetryPolicy};
pub use review::{
    ListReviewQueueHandler, MarkReviewedCommand, MarkReviewedHandler, ReviewStats,
    ReviewStatsHandler,
};
pub use session::{
    DeleteSessionCommand, DeleteSessionHandler, GetSessionHandler, GetSessionQuery,
    ListPendingSessionsHandler,
};
