//! Conversion between [`SessionRecord`] and [`PersistedRecord`].
//!
//! The forward direction wraps a session in the two-message log. The reverse
//! direction unwraps it and recomputes the leaderboard from the stored
//! answers and review texts; neither the stored `parsed_ranking` cache nor
//! any aggregate the session once carried is trusted.

use super::record::{AssistantMessage, Message, PersistedRecord, StoredReview, StoredSynthesis};
use super::session::{SessionRecord, Stage, SynthesisResult};
use crate::core::string::truncate_chars;
use crate::council::{Review, aggregate, extract_ranking};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Maximum title length, in characters
pub const TITLE_MAX_CHARS: usize = 50;

/// Title of a conversation: the first 50 characters of its question.
pub fn title_for(question: &str) -> String {
    truncate_chars(question, TITLE_MAX_CHARS).to_string()
}

/// A fresh, globally unique conversation id.
pub fn new_conversation_id() -> String {
    Uuid::new_v4().to_string()
}

/// The session's id, or a fresh one if it has none.
pub fn resolve_id(session: &SessionRecord) -> String {
    session
        .existing_id()
        .map(str::to_string)
        .unwrap_or_else(new_conversation_id)
}

/// Values the forward conversion needs that a session does not carry
#[derive(Debug, Clone)]
pub struct PersistMeta {
    /// Id to store under (see [`resolve_id`])
    pub id: String,
    /// Original creation time if the id was stored before, otherwise now
    pub created_at: DateTime<Utc>,
    /// Model that produced the final synthesis
    pub synthesizer: String,
}

/// Wrap a session into its durable message-log form.
pub fn to_persisted(session: &SessionRecord, meta: PersistMeta) -> PersistedRecord {
    let stage2 = session
        .reviews
        .iter()
        .map(|review| StoredReview {
            model: review.model.clone(),
            ranking: review.review.clone(),
            parsed_ranking: extract_ranking(&review.review)
                .iter()
                .map(ToString::to_string)
                .collect(),
        })
        .collect();

    let stage3 = session.synthesis.as_ref().map(|synthesis| StoredSynthesis {
        model: meta.synthesizer,
        response: synthesis.final_answer.clone(),
    });

    PersistedRecord {
        id: meta.id,
        title: title_for(&session.question),
        created_at: meta.created_at,
        messages: vec![
            Message::User {
                content: session.question.clone(),
            },
            Message::Assistant(AssistantMessage {
                stage1: session.candidate_answers.clone(),
                stage2,
                stage3,
            }),
        ],
    }
}

/// Rebuild a session from its durable form.
///
/// - A missing user message yields an empty question.
/// - Review text comes from `ranking`; `parsed_ranking` is ignored.
/// - When a synthesis is stored, its leaderboard is recomputed.
pub fn from_persisted(record: &PersistedRecord) -> SessionRecord {
    let question = record.user_message().unwrap_or_default().to_string();

    let (candidate_answers, reviews, synthesis) = match record.assistant_message() {
        Some(assistant) => {
            let answers = assistant.stage1.clone();
            let reviews: Vec<Review> = assistant
                .stage2
                .iter()
                .map(|stored| Review::new(stored.model.clone(), stored.ranking.clone()))
                .collect();
            let synthesis = assistant.stage3.as_ref().map(|stored| {
                SynthesisResult::new(stored.response.clone(), aggregate(&answers, &reviews))
            });
            (answers, reviews, synthesis)
        }
        None => (Vec::new(), Vec::new(), None),
    };

    let stage = Stage::derive(
        synthesis.is_some(),
        !reviews.is_empty(),
        !candidate_answers.is_empty(),
    );

    SessionRecord {
        id: Some(record.id.clone()),
        question,
        selected_models: candidate_answers.iter().map(|a| a.model.clone()).collect(),
        candidate_answers,
        reviews,
        synthesis,
        stage,
    }
}
