//! List Conversations use case

use crate::ports::conversation_store::{ConversationStore, StoreError};
use council_domain::ConversationSummary;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while listing
#[derive(Error, Debug)]
pub enum ListConversationsError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Use case for listing stored conversations, newest first
pub struct ListConversationsUseCase<S: ConversationStore + ?Sized> {
    store: Arc<S>,
}

impl<S: ConversationStore + ?Sized> ListConversationsUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self) -> Result<Vec<ConversationSummary>, ListConversationsError> {
        let mut summaries = self.store.list().await?;
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }
}
