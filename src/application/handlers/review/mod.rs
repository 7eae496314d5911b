//! Operator review handlers.
//!
//! Sessions that reached `Engaging` but never confirmed are queued for a
//! human decision. Reviews annotate a session; they never move its phase.

mod list_review_queue;
mod mark_reviewed;
mod review_stats;

pub use list_review_queue::{ListReviewQueueHandler, DEFAULT_REVIEW_QUEUE_LIMIT};
pub use mark_reviewed::{MarkReviewedCommand, MarkReviewedHandler};
pub use review_stats::{ReviewStats, ReviewStatsHandler};
