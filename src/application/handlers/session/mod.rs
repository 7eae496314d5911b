//! Session operator handlers.
//!
//! Inspection, deletion and the pending-delivery listing.

mod delete_session;
mod get_session;
mod list_pending_sessions;

pub use delete_session::{DeleteSessionCommand, DeleteSessionHandler};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use list_pending_sessions::ListPendingSessionsHandler;
