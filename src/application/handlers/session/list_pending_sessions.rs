//! ListPendingSessionsHandler - Confirmed sessions whose report is not out.

use std::sync::Arc;

use crate::domain::session::{Session, SessionError};
use crate::ports::SessionStore;

/// Handler for listing sessions awaiting report delivery.
pub struct ListPendingSessionsHandler {
    store: Arc<dyn SessionStore>,
}

impl ListPendingSessionsHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Oldest first.
    pub async fn handle(&self) -> Result<Vec<Session>, SessionError> {
        self.store.list_pending_delivery().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::foundation::SessionId;
    use crate::domain::session::Phase;

    #[tokio::test]
    async fn lists_only_confirmed_unsent() {
        let store = InMemorySessionStore::new();
        for id in ["quiet", "hot"] {
            store.get_or_create(&SessionId::new(id).unwrap()).await.unwrap();
        }
        store
            .update(&SessionId::new("hot").unwrap(), &|s: &mut Session| {
                s.advance_phase(Phase::Confirmed);
                Ok(())
            })
            .await
            .unwrap();

        let pending = ListPendingSessionsHandler::new(Arc::new(store))
            .handle()
            .await
            .unwrap();

        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].session_id().as_str(), "hot");
    }
}
