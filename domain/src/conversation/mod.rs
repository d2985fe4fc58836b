//! Conversation records and the transformer between them.
//!
//! - [`session::SessionRecord`] - working state held by a caller
//! - [`record::PersistedRecord`] - durable message-log form
//! - [`transform`] - [`to_persisted`] / [`from_persisted`]
//!
//! Loading always recomputes the leaderboard, so a stored record can never
//! present rankings that disagree with its own review texts.

pub mod record;
pub mod session;
pub mod transform;

pub use record::{
    AssistantMessage, ConversationSummary, Message, PersistedRecord, StoredReview,
    StoredSynthesis, UNTITLED,
};
pub use session::{InvalidStage, SessionRecord, Stage, SynthesisResult};
pub use transform::{
    PersistMeta, TITLE_MAX_CHARS, from_persisted, new_conversation_id, resolve_id, title_for,
    to_persisted,
};
