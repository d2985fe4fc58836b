//! Delete Conversation use case

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::conversation_store::{ConversationStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while deleting
#[derive(Error, Debug)]
pub enum DeleteConversationError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Use case for deleting a conversation
pub struct DeleteConversationUseCase<S: ConversationStore + ?Sized> {
    store: Arc<S>,
    logger: Arc<dyn ConversationLogger>,
}

impl<S: ConversationStore + ?Sized> DeleteConversationUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Returns `Ok(false)` if nothing was stored under `id`.
    pub async fn execute(&self, id: &str) -> Result<bool, DeleteConversationError> {
        let deleted = self.store.delete(id).await?;

        if deleted {
            info!("Deleted conversation {}", id);
            self.logger.log(ConversationEvent::new(
                "conversation_deleted",
                serde_json::json!({ "id": id }),
            ));
        } else {
            debug!("Conversation {} not found, nothing to delete", id);
        }

        Ok(deleted)
    }
}
