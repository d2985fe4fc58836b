//! Domain layer for llm-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns, and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! ## Council ranking
//!
//! - **Labels**: answers are anonymized as "Response A", "Response B", ... by
//!   position
//! - **Extraction**: each review's `FINAL RANKING:` list is parsed into labels
//! - **Aggregation**: labels are mapped back to models and averaged into a
//!   leaderboard
//!
//! ## Conversations
//!
//! - **Session record**: the flat working state of one council question
//! - **Persisted record**: the durable user/assistant message log
//! - **Transform**: converts between the two, recomputing the leaderboard on
//!   load

pub mod config;
pub mod conversation;
pub mod core;
pub mod council;
pub mod prompt;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use conversation::{
    AssistantMessage, ConversationSummary, Message, PersistMeta, PersistedRecord, SessionRecord,
    Stage, StoredReview, StoredSynthesis, SynthesisResult, from_persisted, new_conversation_id,
    resolve_id, title_for, to_persisted,
};
pub use core::error::DomainError;
pub use council::{
    AggregateEntry, CandidateAnswer, Label, LabelMap, RankEntry, Review, aggregate,
    aggregate_with, assign_labels, extract_ranking, labelled_answers,
};
pub use prompt::PromptTemplate;
