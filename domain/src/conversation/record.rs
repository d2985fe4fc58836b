//! Persisted record - the durable message-log shape of a conversation.
//!
//! ```json
//! {
//!   "id": "…", "title": "…", "created_at": "…",
//!   "messages": [
//!     { "role": "user", "content": "question" },
//!     { "role": "assistant",
//!       "stage1": [{ "model": "…", "response": "…" }],
//!       "stage2": [{ "model": "…", "ranking": "…", "parsed_ranking": ["Response A"] }],
//!       "stage3": { "model": "…", "response": "…" } }
//!   ]
//! }
//! ```
//!
//! `parsed_ranking` is a cache for people inspecting the file. It is never
//! read back when a conversation is loaded.
//!
//! `created_at` is written as RFC 3339 UTC. Timestamps without an offset
//! (`2025-01-02T03:04:05.123456`) are also accepted and read as UTC.

use crate::council::CandidateAnswer;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Title used when a stored record has none
pub const UNTITLED: &str = "Untitled";

fn untitled() -> String {
    UNTITLED.to_string()
}

/// Parse an RFC 3339 timestamp, or a naive one taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Some(at.with_timezone(&Utc));
    }
    value
        .parse::<NaiveDateTime>()
        .ok()
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

/// A review as stored, with its ranking parsed at save time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredReview {
    /// The reviewer
    pub model: String,
    /// Full review text
    pub ranking: String,
    /// Labels extracted when the record was written
    #[serde(default)]
    pub parsed_ranking: Vec<String>,
}

/// The final synthesis as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSynthesis {
    /// The model that wrote the synthesis
    pub model: String,
    /// The synthesis text
    pub response: String,
}

/// Assistant turn carrying all three stages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub stage1: Vec<CandidateAnswer>,
    #[serde(default)]
    pub stage2: Vec<StoredReview>,
    #[serde(default)]
    pub stage3: Option<StoredSynthesis>,
}

/// One entry of the message log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// The user's question
    User { content: String },
    /// The council's answers, reviews and synthesis
    Assistant(AssistantMessage),
    /// Any other role; kept so unknown entries do not invalidate a record
    #[serde(other)]
    Other,
}

/// Durable form of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub id: String,
    #[serde(default = "untitled")]
    pub title: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl PersistedRecord {
    /// Decode a stored record.
    ///
    /// Returns `None` when the JSON is unreadable, lacks `id`, `created_at`
    /// or `messages`, or has an empty id. A malformed record is never
    /// partially reconstructed.
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str::<Self>(json)
            .ok()
            .filter(|record| !record.id.is_empty())
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Content of the first user message.
    pub fn user_message(&self) -> Option<&str> {
        self.messages.iter().find_map(|m| match m {
            Message::User { content } => Some(content.as_str()),
            _ => None,
        })
    }

    /// The first assistant message.
    pub fn assistant_message(&self) -> Option<&AssistantMessage> {
        self.messages.iter().find_map(|m| match m {
            Message::Assistant(assistant) => Some(assistant),
            _ => None,
        })
    }

    pub fn summary(&self) -> ConversationSummary {
        ConversationSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            created_at: self.created_at,
        }
    }
}

/// Listing metadata of a stored conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    #[serde(default = "untitled")]
    pub title: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}
