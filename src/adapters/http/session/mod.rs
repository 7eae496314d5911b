//! HTTP adapter for session operator endpoints.

mod dto;
mod handlers;
mod review;
mod routes;

pub use dto::{
    ErrorResponse, MarkReviewedRequest, PendingSessionSummary, PendingSessionsResponse,
    ReviewQueueItem, ReviewQueueResponse, SessionResponse,
};
pub use handlers::SessionHandlers;
pub use review::{review_routes, ReviewHandlers};
pub use routes::session_routes;
