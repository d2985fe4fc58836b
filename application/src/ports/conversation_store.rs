//! Conversation store port
//!
//! Defines how the application layer reads and writes persisted
//! conversations. Implementations (adapters) live in the infrastructure
//! layer.

use async_trait::async_trait;
use council_domain::{ConversationSummary, PersistedRecord};
use thiserror::Error;

/// Errors that can occur during store operations
///
/// A missing or malformed record is not an error: [`ConversationStore::get`]
/// reports both as `Ok(None)`.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid conversation id: {0:?}")]
    InvalidId(String),
}

/// Durable storage for conversations, keyed by id
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Fetch the record stored under `id`.
    ///
    /// Returns `Ok(None)` when nothing is stored under `id` or the stored
    /// data cannot be decoded.
    async fn get(&self, id: &str) -> Result<Option<PersistedRecord>, StoreError>;

    /// Write `record`, replacing anything stored under its id.
    async fn put(&self, record: &PersistedRecord) -> Result<(), StoreError>;

    /// Remove the record stored under `id`.
    ///
    /// Returns `Ok(false)` if there was nothing to remove.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Summaries of every readable record, in no particular order.
    async fn list(&self) -> Result<Vec<ConversationSummary>, StoreError>;
}
