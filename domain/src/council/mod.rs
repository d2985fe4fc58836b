//! Council ranking domain
//!
//! A council question runs in three stages:
//!
//! 1. **Answers** - several models answer the same question
//! 2. **Peer review** - each reviewer sees the answers anonymized as
//!    "Response A", "Response B", ... and ends its review with a
//!    `FINAL RANKING:` numbered list
//! 3. **Synthesis** - a chairman model writes the final answer
//!
//! This module holds the pure logic behind stage 2:
//!
//! ```text
//! answers ──► assign_labels ──► LabelMap ─┐
//!                                         ├─► aggregate_with ──► [AggregateEntry]
//! reviews ──► extract_ranking ─► [Label] ─┘
//! ```
//!
//! Nothing here performs I/O or fails. Malformed reviews simply contribute
//! no votes.

pub mod aggregate;
pub mod label;
pub mod parsing;
pub mod value_objects;

pub use aggregate::{AggregateEntry, RankEntry, aggregate, aggregate_with, rank_entries, round_to_hundredths};
pub use label::{Label, LabelMap, MAX_LABELS, ParseLabelError, assign_labels, labelled_answers};
pub use parsing::{FINAL_RANKING_MARKER, extract_ranking};
pub use value_objects::{CandidateAnswer, Review};
