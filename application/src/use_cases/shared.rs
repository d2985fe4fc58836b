//! Shared types for the conversation use cases.

use chrono::{DateTime, Utc};
use council_domain::SessionRecord;
use serde::Serialize;

/// A conversation as handed back to callers: listing metadata plus the
/// session state under `data`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationView {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub data: SessionRecord,
}
