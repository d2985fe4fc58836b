//! Load Conversation use case
//!
//! Reads a stored record and unwraps it into session form. The leaderboard
//! is always recomputed from the stored answers and review texts.

use crate::ports::conversation_store::{ConversationStore, StoreError};
use crate::use_cases::shared::ConversationView;
use council_domain::from_persisted;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading
#[derive(Error, Debug)]
pub enum LoadConversationError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Use case for loading a conversation
pub struct LoadConversationUseCase<S: ConversationStore + ?Sized> {
    store: Arc<S>,
}

impl<S: ConversationStore + ?Sized> LoadConversationUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns `Ok(None)` when `id` is not stored or its record is malformed.
    pub async fn execute(
        &self,
        id: &str,
    ) -> Result<Option<ConversationView>, LoadConversationError> {
        let Some(record) = self.store.get(id).await? else {
            debug!("Conversation {} not found", id);
            return Ok(None);
        };

        let data = from_persisted(&record);
        Ok(Some(ConversationView {
            id: record.id,
            title: record.title,
            created_at: record.created_at,
            data,
        }))
    }
}
