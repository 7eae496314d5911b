//! DeleteSessionHandler - Command handler for removing a session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::session::SessionError;
use crate::ports::SessionStore;

/// Command to delete a session.
#[derive(Debug, Clone)]
pub struct DeleteSessionCommand {
    pub session_id: SessionId,
}

/// Handler for deleting sessions.
pub struct DeleteSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl DeleteSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Removes the session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session has this id
    pub async fn handle(&self, cmd: DeleteSessionCommand) -> Result<(), SessionError> {
        if !self.store.delete(&cmd.session_id).await? {
            return Err(SessionError::not_found(&cmd.session_id));
        }
        tracing::info!(session_id = %cmd.session_id, "Session deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;

    #[tokio::test]
    async fn deletes_then_reports_not_found() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new("gone").unwrap();
        store.get_or_create(&id).await.unwrap();
        let handler = DeleteSessionHandler::new(Arc::new(store.clone()));

        handler
            .handle(DeleteSessionCommand {
                session_id: id.clone(),
            })
            .await
            .unwrap();
        let again = handler.handle(DeleteSessionCommand { session_id: id }).await;

        assert!(matches!(again, Err(SessionError::NotFound(_))));
        assert_eq!(store.session_count().await, 0);
    }
}
