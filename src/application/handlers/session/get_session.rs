//! GetSessionHandler - Query handler for operator session inspection.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::{Session, SessionError};
use crate::ports::SessionStore;

/// Query to get a session by ID.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler for retrieving session details.
pub struct GetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl GetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<Session, SessionError> {
        self.store.get(&query.session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;

    #[tokio::test]
    async fn returns_existing_session() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new("inspect-me").unwrap();
        store.get_or_create(&id).await.unwrap();
        let handler = GetSessionHandler::new(Arc::new(store));

        let session = handler
            .handle(GetSessionQuery {
                session_id: id.clone(),
            })
            .await
            .unwrap();

        assert_eq!(session.session_id(), &id);
    }

    #[tokio::test]
    async fn returns_not_found_for_unknown_session() {
        let handler = GetSessionHandler::new(Arc::new(InMemorySessionStore::new()));

        let result = handler
            .handle(GetSessionQuery {
                session_id: SessionId::new("nobody").unwrap(),
            })
            .await;

        assert!(matches!(result, Err(SessionError::NotFound(_))));
    }
}
