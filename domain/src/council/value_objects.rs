//! Council value objects - the inputs of one synthesis request.
//!
//! - [`CandidateAnswer`] - one model's answer to the question (Stage 1)
//! - [`Review`] - one reviewer's free-text evaluation and ranking (Stage 2)
//!
//! The order of candidate answers is significant: it decides which answer is
//! shown to reviewers as "Response A", "Response B", and so on.

use serde::{Deserialize, Serialize};

/// Answer from a single model in the first stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateAnswer {
    /// The model that produced this answer
    pub model: String,
    /// The answer text
    pub response: String,
}

impl CandidateAnswer {
    /// Creates a candidate answer.
    ///
    /// # Arguments
    /// * `model` - Name of the model that generated the answer
    /// * `response` - The model's answer to the question
    pub fn new(model: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            response: response.into(),
        }
    }
}

/// Peer review written by one reviewer over all anonymized answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// The model that wrote the review
    pub model: String,
    /// Full review text, ideally ending in a `FINAL RANKING:` section
    pub review: String,
}

impl Review {
    /// Creates a review.
    pub fn new(model: impl Into<String>, review: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            review: review.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_answer_wire_shape() {
        let answer = CandidateAnswer::new("ChatGPT", "Rust is a systems language.");
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["model"], "ChatGPT");
        assert_eq!(json["response"], "Rust is a systems language.");
    }

    #[test]
    fn test_review_deserializes_from_request_shape() {
        let review: Review =
            serde_json::from_str(r#"{"model": "Claude", "review": "FINAL RANKING:\n1. Response A"}"#)
                .unwrap();
        assert_eq!(review.model, "Claude");
        assert!(review.review.starts_with("FINAL RANKING:"));
    }
}
