//! Session Store Port - Keyed storage for conversation sessions.
//!
//! One record per session id. Every mutation goes through [`SessionStore::update`],
//! a version-checked read-modify-write that is atomic per key. Nothing is
//! atomic across keys.
//!
//! # Example
//!
//! ```ignore
//! let session = store
//!     .update(&session_id, &|s: &mut Session| s.mark_reported())
//!     .await?;
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::session::{Session, SessionError};

/// Mutation applied to a private copy of a session inside [`SessionStore::update`].
///
/// May run more than once when the write loses a version race, so it must be
/// a pure function of the session it is given. Returning an error aborts the
/// update and writes nothing.
pub type SessionMutator<'a> = &'a (dyn Fn(&mut Session) -> Result<(), SessionError> + Send + Sync);

/// Port for session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the session, creating a fresh one if the id is unseen.
    ///
    /// Concurrent first contact for the same id yields one record.
    async fn get_or_create(&self, id: &SessionId) -> Result<Session, SessionError>;

    /// Returns the session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session has this id
    async fn get(&self, id: &SessionId) -> Result<Session, SessionError>;

    /// Applies `mutator` and writes back only if the stored version is
    /// unchanged; otherwise re-reads and re-applies up to the attempt budget.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session has this id
    /// - `Conflict` when the attempt budget is exhausted
    /// - any error returned by the mutator
    async fn update(&self, id: &SessionId, mutator: SessionMutator<'_>)
        -> Result<Session, SessionError>;

    /// Removes the session. Returns true if it existed.
    async fn delete(&self, id: &SessionId) -> Result<bool, SessionError>;

    /// Sessions that are confirmed but whose report has not been delivered.
    async fn list_pending_delivery(&self) -> Result<Vec<Session>, SessionError>;

    /// Sessions in the operator review queue or already reviewed.
    async fn list_for_review(&self) -> Result<Vec<Session>, SessionError>;

    /// Removes sessions not updated since `cutoff`, except those still owing a
    /// report. Returns how many went.
    async fn purge_idle_before(&self, cutoff: Timestamp) -> Result<u64, SessionError>;
}
