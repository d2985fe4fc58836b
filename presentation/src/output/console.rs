//! Console output formatter for council results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_application::{ConversationView, RunSynthesisInput, SynthesisOutcome};
use council_domain::{
    AggregateEntry, CandidateAnswer, ConversationSummary, Review, SessionRecord,
    labelled_answers,
};

/// Formats council results for console display
pub struct ConsoleFormatter {
    /// Show every answer and review, not just the outcome
    full: bool,
}

impl ConsoleFormatter {
    pub fn new(full: bool) -> Self {
        Self { full }
    }

    /// Concise formatter: final answer and leaderboard only
    pub fn concise() -> Self {
        Self::new(false)
    }

    /// Full formatter: every stage
    pub fn full() -> Self {
        Self::new(true)
    }

    /// Render the leaderboard as a ranked table.
    pub fn leaderboard(rankings: &[AggregateEntry]) -> String {
        if rankings.is_empty() {
            return format!("{}\n", "No parseable rankings.".dimmed());
        }

        let width = rankings.iter().map(|e| e.model.len()).max().unwrap_or(0);
        let mut output = String::new();
        for (position, entry) in rankings.iter().enumerate() {
            let votes = if entry.vote_count == 1 { "vote" } else { "votes" };
            output.push_str(&format!(
                "  {:>2}. {}  avg {:.2}  ({} {})\n",
                position + 1,
                format!("{:<width$}", entry.model, width = width).bold(),
                entry.mean_rank,
                entry.vote_count,
                votes
            ));
        }
        output
    }

    fn answers_section(answers: &[CandidateAnswer]) -> String {
        let mut output = Self::section_header("Stage 1: Individual Answers");
        for (label, answer) in labelled_answers(answers) {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ({}) ──", answer.model, label).yellow().bold(),
                answer.response
            ));
        }
        output
    }

    fn reviews_section(reviews: &[Review]) -> String {
        let mut output = Self::section_header("Stage 2: Peer Reviews");
        for review in reviews {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ──", review.model).yellow().bold(),
                review.review
            ));
        }
        output
    }

    fn rankings_section(rankings: &[AggregateEntry]) -> String {
        format!(
            "{}\n{}",
            Self::section_header("Aggregate Rankings"),
            Self::leaderboard(rankings)
        )
    }

    fn session_body(&self, session: &SessionRecord) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            session.question
        ));
        if !session.selected_models.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Models:".cyan().bold(),
                session.selected_models.join(", ")
            ));
        }
        output.push_str(&format!(
            "{} {}\n",
            "Progress:".cyan().bold(),
            session.stage
        ));

        if self.full && !session.candidate_answers.is_empty() {
            output.push_str(&Self::answers_section(&session.candidate_answers));
        }
        if self.full && !session.reviews.is_empty() {
            output.push_str(&Self::reviews_section(&session.reviews));
        }

        if let Some(synthesis) = &session.synthesis {
            output.push_str(&Self::rankings_section(&synthesis.aggregate_rankings));
            output.push_str(&Self::section_header("Stage 3: Final Synthesis"));
            output.push_str(&format!("\n{}\n", synthesis.final_answer));
        } else if !session.reviews.is_empty() {
            output.push_str(&Self::rankings_section(&session.leaderboard()));
        }

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}\n", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_synthesis(&self, input: &RunSynthesisInput, outcome: &SynthesisOutcome) -> String {
        let mut output = Self::header("LLM Council Results");
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Question:".cyan().bold(),
            input.question
        ));

        if self.full {
            output.push_str(&Self::answers_section(&input.stage1_responses));
            if !input.stage2_reviews.is_empty() {
                output.push_str(&Self::reviews_section(&input.stage2_reviews));
            }
        }

        output.push_str(&Self::rankings_section(&outcome.result.aggregate_rankings));
        output.push_str(&Self::section_header("Final Synthesis"));
        output.push_str(&format!("\n{}\n", outcome.result.final_answer));

        if let Some(id) = &outcome.conversation_id {
            output.push_str(&format!("\n{} {}\n", "Saved as".dimmed(), id));
        }

        output.push_str(&Self::footer());
        output
    }

    fn format_leaderboard(&self, question: &str, rankings: &[AggregateEntry]) -> String {
        format!(
            "{} {}\n{}",
            "Question:".cyan().bold(),
            question,
            Self::rankings_section(rankings)
        )
    }

    fn format_conversation(&self, view: &ConversationView) -> String {
        let mut output = Self::header(&view.title);
        output.push_str(&format!(
            "{} {}\n{} {}\n\n",
            "Id:".dimmed(),
            view.id,
            "Created:".dimmed(),
            view.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&self.session_body(&view.data));
        output.push_str(&Self::footer());
        output
    }

    fn format_conversation_list(&self, summaries: &[ConversationSummary]) -> String {
        if summaries.is_empty() {
            return format!("{}\n", "No saved conversations.".dimmed());
        }

        summaries
            .iter()
            .map(|summary| {
                format!(
                    "{}  {}  {}\n",
                    summary.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                    summary.id.yellow(),
                    summary.title
                )
            })
            .collect()
    }

    fn format_saved(&self, view: &ConversationView) -> String {
        format!(
            "{} {} ({})\n",
            "Saved".green().bold(),
            view.id,
            view.title
        )
    }

    fn format_deleted(&self, id: &str) -> String {
        format!("{} {}\n", "Deleted".green().bold(), id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use council_domain::SynthesisResult;

    fn rankings() -> Vec<AggregateEntry> {
        vec![
            AggregateEntry {
                model: "Claude".to_string(),
                mean_rank: 1.0,
                vote_count: 1,
            },
            AggregateEntry {
                model: "GPT".to_string(),
                mean_rank: 1.5,
                vote_count: 2,
            },
        ]
    }

    fn input() -> RunSynthesisInput {
        RunSynthesisInput::new(
            "What is Rust?",
            vec![
                CandidateAnswer::new("GPT", "A language."),
                CandidateAnswer::new("Claude", "A safe systems language."),
            ],
        )
        .with_reviews(vec![Review::new(
            "GPT",
            "FINAL RANKING:\n1. Response B\n2. Response A",
        )])
    }

    fn outcome() -> SynthesisOutcome {
        SynthesisOutcome {
            conversation_id: Some("c1".to_string()),
            result: SynthesisResult::new("Rust is a safe systems language.", rankings()),
        }
    }

    #[test]
    fn test_leaderboard_rows() {
        let table = ConsoleFormatter::leaderboard(&rankings());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("1."));
        assert!(lines[0].contains("Claude"));
        assert!(lines[0].contains("avg 1.00"));
        assert!(lines[0].contains("(1 vote)"));
        assert!(lines[1].contains("avg 1.50"));
        assert!(lines[1].contains("(2 votes)"));
    }

    #[test]
    fn test_empty_leaderboard() {
        assert!(ConsoleFormatter::leaderboard(&[]).contains("No parseable rankings."));
    }

    #[test]
    fn test_concise_synthesis_hides_stages() {
        let text = ConsoleFormatter::concise().format_synthesis(&input(), &outcome());
        assert!(text.contains("What is Rust?"));
        assert!(text.contains("Rust is a safe systems language."));
        assert!(text.contains("avg 1.50"));
        assert!(text.contains("c1"));
        assert!(!text.contains("A language."));
    }

    #[test]
    fn test_full_synthesis_shows_labelled_answers_and_reviews() {
        let text = ConsoleFormatter::full().format_synthesis(&input(), &outcome());
        assert!(text.contains("GPT (Response A)"));
        assert!(text.contains("Claude (Response B)"));
        assert!(text.contains("A language."));
        assert!(text.contains("FINAL RANKING:\n1. Response B"));
    }

    #[test]
    fn test_conversation_list() {
        let summaries = vec![ConversationSummary {
            id: "c1".to_string(),
            title: "What is Rust?".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6).unwrap(),
        }];
        let text = ConsoleFormatter::concise().format_conversation_list(&summaries);
        assert!(text.contains("2025-02-03 04:05"));
        assert!(text.contains("c1"));
        assert!(text.contains("What is Rust?"));

        assert!(
            ConsoleFormatter::concise()
                .format_conversation_list(&[])
                .contains("No saved conversations.")
        );
    }

    #[test]
    fn test_conversation_without_synthesis_shows_live_leaderboard() {
        let view = ConversationView {
            id: "c2".to_string(),
            title: "What is Rust?".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6).unwrap(),
            data: SessionRecord::new("What is Rust?")
                .with_answers(input().stage1_responses)
                .with_reviews(input().stage2_reviews),
        };
        let text = ConsoleFormatter::concise().format_conversation(&view);
        assert!(text.contains("Stage 3: Complete"));
        assert!(text.contains("Aggregate Rankings"));
        assert!(text.contains("avg 1.00"));
        assert!(!text.contains("Final Synthesis"));
    }
}
