//! Session record - the working shape a caller holds while moving through
//! the council stages.
//!
//! Field names on the wire follow the camelCase conversation state used by
//! the client (`stage1Responses`, `stage2Reviews`, `stage3Result`,
//! `currentStage`).

use crate::council::{AggregateEntry, CandidateAnswer, Review, aggregate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned for a stage number outside `1..=3`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid stage number: {0}")]
pub struct InvalidStage(pub u8);

/// Stage marker of a session
///
/// Serialized as its number (`1`, `2`, `3`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Stage {
    /// Collecting candidate answers
    #[default]
    Answers = 1,
    /// Collecting peer reviews
    Review = 2,
    /// Synthesis available (or reviews already collected)
    Complete = 3,
}

impl Stage {
    /// Stage number as shown to users
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Stage implied by what a session contains.
    ///
    /// Having any reviews counts as complete, the same as having a
    /// synthesis. Having only answers means reviews are being collected.
    pub fn derive(has_synthesis: bool, has_reviews: bool, has_answers: bool) -> Self {
        if has_synthesis || has_reviews {
            Stage::Complete
        } else if has_answers {
            Stage::Review
        } else {
            Stage::Answers
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Stage::Answers => "Answers",
            Stage::Review => "Peer Review",
            Stage::Complete => "Complete",
        }
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.number()
    }
}

impl TryFrom<u8> for Stage {
    type Error = InvalidStage;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Stage::Answers),
            2 => Ok(Stage::Review),
            3 => Ok(Stage::Complete),
            other => Err(InvalidStage(other)),
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stage {}: {}", self.number(), self.display_name())
    }
}

/// Final synthesis together with the leaderboard computed for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisResult {
    /// The chairman's final answer
    pub final_answer: String,
    /// Peer-ranking leaderboard, ascending mean rank
    #[serde(default)]
    pub aggregate_rankings: Vec<AggregateEntry>,
}

impl SynthesisResult {
    pub fn new(final_answer: impl Into<String>, aggregate_rankings: Vec<AggregateEntry>) -> Self {
        Self {
            final_answer: final_answer.into(),
            aggregate_rankings,
        }
    }
}

/// Ephemeral conversation state driven through the stages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Conversation id, absent until first saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The user's question
    #[serde(default)]
    pub question: String,
    /// Models taking part, in answer order
    #[serde(default, rename = "selectedModels")]
    pub selected_models: Vec<String>,
    /// Stage 1: candidate answers (order decides labels)
    #[serde(default, rename = "stage1Responses")]
    pub candidate_answers: Vec<CandidateAnswer>,
    /// Stage 2: peer reviews
    #[serde(default, rename = "stage2Reviews")]
    pub reviews: Vec<Review>,
    /// Stage 3: final synthesis, if produced
    #[serde(default, rename = "stage3Result")]
    pub synthesis: Option<SynthesisResult>,
    /// Current stage marker
    #[serde(default, rename = "currentStage")]
    pub stage: Stage,
}

impl SessionRecord {
    /// Start a new session for `question`.
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the stage 1 answers; selected models follow their order.
    pub fn with_answers(mut self, answers: Vec<CandidateAnswer>) -> Self {
        self.selected_models = answers.iter().map(|a| a.model.clone()).collect();
        self.candidate_answers = answers;
        self.stage = self.derived_stage();
        self
    }

    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = reviews;
        self.stage = self.derived_stage();
        self
    }

    pub fn with_synthesis(mut self, synthesis: SynthesisResult) -> Self {
        self.synthesis = Some(synthesis);
        self.stage = self.derived_stage();
        self
    }

    /// The id, ignoring an empty one.
    pub fn existing_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Stage implied by the session's contents.
    pub fn derived_stage(&self) -> Stage {
        Stage::derive(
            self.synthesis.is_some(),
            !self.reviews.is_empty(),
            !self.candidate_answers.is_empty(),
        )
    }

    /// Compute the leaderboard from the current answers and reviews.
    pub fn leaderboard(&self) -> Vec<AggregateEntry> {
        aggregate(&self.candidate_answers, &self.reviews)
    }
}
