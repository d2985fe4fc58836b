//! Save Conversation use case
//!
//! Persists a session as a message-log record. Saving under an id that is
//! already stored is an explicit read-modify-write: the stored `created_at`
//! is read first and carried over, everything else is replaced.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::conversation_store::{ConversationStore, StoreError};
use crate::use_cases::shared::ConversationView;
use chrono::{DateTime, Utc};
use council_domain::{PersistMeta, SessionRecord, resolve_id, to_persisted};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while saving
#[derive(Error, Debug)]
pub enum SaveConversationError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Use case for saving a conversation
pub struct SaveConversationUseCase<S: ConversationStore + ?Sized> {
    store: Arc<S>,
    synthesizer: String,
    logger: Arc<dyn ConversationLogger>,
}

impl<S: ConversationStore + ?Sized> SaveConversationUseCase<S> {
    /// `synthesizer` is the model recorded as the author of any final
    /// synthesis in saved sessions.
    pub fn new(store: Arc<S>, synthesizer: impl Into<String>) -> Self {
        Self {
            store,
            synthesizer: synthesizer.into(),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub async fn execute(
        &self,
        session: SessionRecord,
    ) -> Result<ConversationView, SaveConversationError> {
        let id = resolve_id(&session);
        let created_at = self.original_created_at(&id).await.unwrap_or_else(Utc::now);

        let record = to_persisted(
            &session,
            PersistMeta {
                id: id.clone(),
                created_at,
                synthesizer: self.synthesizer.clone(),
            },
        );
        self.store.put(&record).await?;

        info!("Saved conversation {}", id);
        self.logger.log(ConversationEvent::new(
            "conversation_saved",
            serde_json::json!({
                "id": id,
                "title": record.title,
                "answers": session.candidate_answers.len(),
                "reviews": session.reviews.len(),
                "has_synthesis": session.synthesis.is_some(),
            }),
        ));

        let mut data = session;
        data.id = Some(id.clone());

        Ok(ConversationView {
            id,
            title: record.title,
            created_at,
            data,
        })
    }

    /// `created_at` of the record already stored under `id`, if any.
    ///
    /// A failed read counts as "not stored": the save goes ahead with a
    /// fresh timestamp.
    async fn original_created_at(&self, id: &str) -> Option<DateTime<Utc>> {
        match self.store.get(id).await {
            Ok(Some(existing)) => {
                debug!("Conversation {} exists, keeping created_at", id);
                Some(existing.created_at)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Could not read existing conversation {}: {}", id, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MemoryStore, RecordingLogger};
    use chrono::TimeZone;
    use council_domain::{CandidateAnswer, Review, SynthesisResult};

    fn session() -> SessionRecord {
        SessionRecord::new("Explain ownership in Rust in a few sentences, please.")
            .with_answers(vec![
                CandidateAnswer::new("X", "Each value has one owner."),
                CandidateAnswer::new("Y", "Borrowing lends access."),
            ])
            .with_reviews(vec![Review::new(
                "X",
                "FINAL RANKING:\n1. Response B\n2. Response A",
            )])
    }

    #[tokio::test]
    async fn test_first_save_generates_id_and_timestamp() {
        let store = Arc::new(MemoryStore::default());
        let use_case = SaveConversationUseCase::new(store.clone(), "chairman");

        let before = Utc::now();
        let view = use_case.execute(session()).await.unwrap();

        assert!(!view.id.is_empty());
        assert_eq!(view.data.id.as_deref(), Some(view.id.as_str()));
        assert!(view.created_at >= before);
        assert_eq!(view.title, "Explain ownership in Rust in a few sentences, plea");
        assert_eq!(view.title.chars().count(), 50);

        let stored = store.stored(&view.id).unwrap();
        assert_eq!(stored.created_at, view.created_at);
    }

    #[tokio::test]
    async fn test_resave_preserves_created_at_and_overwrites_rest() {
        let store = Arc::new(MemoryStore::default());
        let original = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let use_case = SaveConversationUseCase::new(store.clone(), "chairman");

        let first = use_case.execute(session().with_id("c1")).await.unwrap();
        // Pretend the first save happened long ago
        let mut aged = store.stored("c1").unwrap();
        aged.created_at = original;
        store.insert(aged);

        let updated = session()
            .with_id("c1")
            .with_synthesis(SynthesisResult::new("Ownership moves.", vec![]));
        let second = use_case.execute(updated).await.unwrap();

        assert_eq!(first.id, "c1");
        assert_eq!(second.created_at, original);

        let stored = store.stored("c1").unwrap();
        assert_eq!(stored.created_at, original);
        let stage3 = stored.assistant_message().unwrap().stage3.clone().unwrap();
        assert_eq!(stage3.model, "chairman");
        assert_eq!(stage3.response, "Ownership moves.");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        let store = Arc::new(MemoryStore::failing_writes());
        let use_case = SaveConversationUseCase::new(store, "chairman");

        let result = use_case.execute(session()).await;
        assert!(matches!(result, Err(SaveConversationError::Store(_))));
    }

    #[tokio::test]
    async fn test_save_is_logged() {
        let store = Arc::new(MemoryStore::default());
        let logger = Arc::new(RecordingLogger::default());
        let use_case =
            SaveConversationUseCase::new(store, "chairman").with_logger(logger.clone());

        use_case.execute(session().with_id("c9")).await.unwrap();

        let events = logger.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, "conversation_saved");
        assert_eq!(events[0].1["id"], "c9");
        assert_eq!(events[0].1["reviews"], 1);
    }
}
