//! In-Memory Session Store Adapter
//!
//! Sessions live in a fixed number of shards chosen by key hash, each shard
//! behind its own async lock. Locks are held only for a read or for the
//! version-checked write, never while a mutator runs.

use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::session::{Session, SessionError};
use crate::ports::{SessionMutator, SessionStore};

pub const DEFAULT_SHARD_COUNT: usize = 16;
pub const DEFAULT_MAX_UPDATE_ATTEMPTS: u32 = 8;

type Shard = RwLock<HashMap<SessionId, Session>>;

/// Sharded in-memory session table with optimistic versioning.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    shards: Arc<Vec<Shard>>,
    max_update_attempts: u32,
}

impl InMemorySessionStore {
    /// Create a store with default sharding and retry budget
    pub fn new() -> Self {
        Self::with_config(DEFAULT_SHARD_COUNT, DEFAULT_MAX_UPDATE_ATTEMPTS)
    }

    /// Create a store with explicit shard count and update attempt budget.
    /// Zero values are raised to one.
    pub fn with_config(shard_count: usize, max_update_attempts: u32) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| RwLock::new(HashMap::new()))
            .collect();
        Self {
            shards: Arc::new(shards),
            max_update_attempts: max_update_attempts.max(1),
        }
    }

    fn shard(&self, id: &SessionId) -> &Shard {
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        let index = (hasher.finish() % self.shards.len() as u64) as usize;
        &self.shards[index]
    }

    /// Number of stored sessions (useful for tests)
    pub async fn session_count(&self) -> usize {
        let mut total = 0;
        for shard in self.shards.iter() {
            total += shard.read().await.len();
        }
        total
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, id: &SessionId) -> Result<Session, SessionError> {
        let shard = self.shard(id);
        if let Some(existing) = shard.read().await.get(id) {
            return Ok(existing.clone());
        }

        let mut sessions = shard.write().await;
        let session = sessions.entry(id.clone()).or_insert_with(|| {
            tracing::debug!(session_id = %id, "Session created");
            Session::new(id.clone())
        });
        Ok(session.clone())
    }

    async fn get(&self, id: &SessionId) -> Result<Session, SessionError> {
        self.shard(id)
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::not_found(id))
    }

    async fn update(
        &self,
        id: &SessionId,
        mutator: SessionMutator<'_>,
    ) -> Result<Session, SessionError> {
        let shard = self.shard(id);

        for attempt in 1..=self.max_update_attempts {
            let mut draft = self.get(id).await?;
            let expected = draft.version();

            mutator(&mut draft)?;
            draft.commit();

            let mut sessions = shard.write().await;
            match sessions.get_mut(id) {
                None => return Err(SessionError::not_found(id)),
                Some(current) if current.version() == expected => {
                    *current = draft.clone();
                    return Ok(draft);
                }
                Some(current) => {
                    tracing::debug!(
                        session_id = %id,
                        attempt,
                        expected,
                        found = current.version(),
                        "Session version moved, retrying update"
                    );
                }
            }
            drop(sessions);
            tokio::task::yield_now().await;
        }

        tracing::warn!(
            session_id = %id,
            attempts = self.max_update_attempts,
            "Session update gave up after repeated conflicts"
        );
        Err(SessionError::conflict(id, self.max_update_attempts))
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, SessionError> {
        Ok(self.shard(id).write().await.remove(id).is_some())
    }

    async fn list_pending_delivery(&self) -> Result<Vec<Session>, SessionError> {
        let mut pending = Vec::new();
        for shard in self.shards.iter() {
            pending.extend(
                shard
                    .read()
                    .await
                    .values()
                    .filter(|s| s.is_pending_delivery())
                    .cloned(),
            );
        }
        pending.sort_by_key(|s| s.updated_at());
        Ok(pending)
    }

    async fn list_for_review(&self) -> Result<Vec<Session>, SessionError> {
        let mut candidates = Vec::new();
        for shard in self.shards.iter() {
            candidates.extend(
                shard
                    .read()
                    .await
                    .values()
                    .filter(|s| s.awaits_review() || s.review().is_some())
                    .cloned(),
            );
        }
        candidates.sort_by_key(|s| s.updated_at());
        Ok(candidates)
    }

    async fn purge_idle_before(&self, cutoff: Timestamp) -> Result<u64, SessionError> {
        let mut purged = 0u64;
        for shard in self.shards.iter() {
            let mut sessions = shard.write().await;
            let before = sessions.len();
            sessions.retain(|_, s| s.is_pending_delivery() || !s.updated_at().is_before(&cutoff));
            purged += (before - sessions.len()) as u64;
        }
        Ok(purged)
    }
}
