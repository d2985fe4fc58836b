//! Anonymization labels for candidate answers.
//!
//! Reviewers never see which model wrote which answer. Each answer is shown
//! as "Response A", "Response B", ... by its position in the ordered answer
//! list, and the resulting [`LabelMap`] translates labels back to models when
//! rankings are aggregated.
//!
//! Label assignment depends only on position. Re-deriving the map from the
//! same ordered answers always yields the same map, which is what lets a
//! stored conversation recompute its rankings on load.

use super::value_objects::CandidateAnswer;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Text that precedes the letter in every label
pub const LABEL_PREFIX: &str = "Response";

/// Number of distinct labels (`A` through `Z`)
pub const MAX_LABELS: usize = 26;

/// Error returned when a string is not a well-formed label
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid response label: {0:?}")]
pub struct ParseLabelError(pub String);

/// Anonymous label of one candidate answer (e.g. "Response A")
///
/// Always holds an uppercase ASCII letter, so `"response c"` and
/// `"RESPONSE C"` both normalize to `Response C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(char);

impl Label {
    /// Label for the answer at zero-based `index`, or `None` past `Z`.
    pub fn from_index(index: usize) -> Option<Self> {
        if index < MAX_LABELS {
            Some(Label((b'A' + index as u8) as char))
        } else {
            None
        }
    }

    /// Label for an ASCII letter in either case.
    pub fn from_letter(letter: char) -> Option<Self> {
        letter
            .is_ascii_alphabetic()
            .then(|| Label(letter.to_ascii_uppercase()))
    }

    /// The uppercase letter of this label
    pub fn letter(&self) -> char {
        self.0
    }

    /// Zero-based position this label stands for
    pub fn index(&self) -> usize {
        (self.0 as u8 - b'A') as usize
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", LABEL_PREFIX, self.0)
    }
}

impl std::str::FromStr for Label {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseLabelError(s.to_string());

        let trimmed = s.trim();
        let (prefix, letter) = trimmed.split_once(' ').ok_or_else(invalid)?;
        if !prefix.eq_ignore_ascii_case(LABEL_PREFIX) {
            return Err(invalid());
        }

        let mut chars = letter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Label::from_letter(c).ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}

impl Serialize for Label {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Mapping from labels to the models behind them, for one request
///
/// Built only through [`assign_labels`]. Entries are stored by position, so
/// a label's letter is also its index into the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    models: Vec<String>,
}

impl LabelMap {
    /// Model behind `label`, or `None` for a letter outside this request.
    pub fn get(&self, label: &Label) -> Option<&str> {
        self.models.get(label.index()).map(String::as_str)
    }

    /// Iterate `(label, model)` pairs in label order.
    pub fn iter(&self) -> impl Iterator<Item = (Label, &str)> {
        self.models
            .iter()
            .enumerate()
            .filter_map(|(i, model)| Label::from_index(i).map(|label| (label, model.as_str())))
    }

    /// Number of labelled answers
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns `true` if no answer received a label.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Pair each candidate answer with its positional label.
///
/// Answers past the 26th have no letter and are left out.
pub fn labelled_answers(answers: &[CandidateAnswer]) -> Vec<(Label, &CandidateAnswer)> {
    answers
        .iter()
        .enumerate()
        .map_while(|(i, answer)| Label::from_index(i).map(|label| (label, answer)))
        .collect()
}

/// Assign "Response A", "Response B", ... to `answers` in the order given.
pub fn assign_labels(answers: &[CandidateAnswer]) -> LabelMap {
    LabelMap {
        models: labelled_answers(answers)
            .into_iter()
            .map(|(_, answer)| answer.model.clone())
            .collect(),
    }
}
