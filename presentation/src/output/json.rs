//! JSON output formatter

use crate::output::formatter::OutputFormatter;
use council_application::{ConversationView, RunSynthesisInput, SynthesisOutcome};
use council_domain::{AggregateEntry, ConversationSummary};
use serde::Serialize;

/// Formats council results as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_synthesis(&self, _input: &RunSynthesisInput, outcome: &SynthesisOutcome) -> String {
        Self::to_json(outcome)
    }

    fn format_leaderboard(&self, question: &str, rankings: &[AggregateEntry]) -> String {
        Self::to_json(&serde_json::json!({
            "question": question,
            "aggregate_rankings": rankings,
        }))
    }

    fn format_conversation(&self, view: &ConversationView) -> String {
        Self::to_json(view)
    }

    fn format_conversation_list(&self, summaries: &[ConversationSummary]) -> String {
        Self::to_json(summaries)
    }

    fn format_saved(&self, view: &ConversationView) -> String {
        Self::to_json(view)
    }

    fn format_deleted(&self, id: &str) -> String {
        Self::to_json(&serde_json::json!({ "id": id, "deleted": true }))
    }
}
