//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Extraction, aggregation and state transformation are total functions and
/// never produce these. They are raised only when validating a request at
/// the boundary of a use case.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("No candidate answers supplied")]
    NoCandidates,

    #[error("Too many candidate answers: {count} (labels run from Response A to Response Z)")]
    TooManyCandidates { count: usize },
}
