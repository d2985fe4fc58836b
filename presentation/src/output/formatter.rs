//! Output formatter trait

use council_application::{ConversationView, RunSynthesisInput, SynthesisOutcome};
use council_domain::{AggregateEntry, ConversationSummary};

/// Trait for formatting council results
pub trait OutputFormatter {
    /// Result of a synthesis request
    fn format_synthesis(&self, input: &RunSynthesisInput, outcome: &SynthesisOutcome) -> String;

    /// Leaderboard computed without a synthesis
    fn format_leaderboard(&self, question: &str, rankings: &[AggregateEntry]) -> String;

    /// One stored conversation
    fn format_conversation(&self, view: &ConversationView) -> String;

    /// Stored conversations, in the given order
    fn format_conversation_list(&self, summaries: &[ConversationSummary]) -> String;

    /// Confirmation of a save
    fn format_saved(&self, view: &ConversationView) -> String;

    /// Confirmation of a deletion
    fn format_deleted(&self, id: &str) -> String;
}
