//! Aggregation of peer rankings into a leaderboard.
//!
//! Every reviewer's parsed ranking contributes one [`RankEntry`] per
//! recognised label: position 1 is rank 1, position 2 is rank 2, and so on.
//! Ranks are then averaged per model. Lower is better.
//!
//! Aggregates are a view over the answers and reviews. They are never read
//! back from storage; callers recompute them with [`aggregate`] whenever they
//! are needed.

use super::label::{Label, LabelMap, assign_labels};
use super::parsing::extract_ranking;
use super::value_objects::{CandidateAnswer, Review};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One reviewer's placement of one model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    /// The ranked model
    pub model: String,
    /// 1-based position in the reviewer's ranking
    pub rank: u32,
}

/// Combined standing of one model across all reviews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateEntry {
    /// The ranked model
    pub model: String,
    /// Mean of all ranks received, rounded to 2 decimal places
    #[serde(rename = "avg_rank")]
    pub mean_rank: f64,
    /// Number of ranks received (always at least 1)
    #[serde(rename = "votes")]
    pub vote_count: u32,
}

/// Round to 2 decimal places.
///
/// Rounds the exact binary value, ties to even: `1.125` becomes `1.12`,
/// while `2.675` (stored as `2.67499…`) becomes `2.67`. Scaling by 100
/// first would round the product and land on the wrong side of such values.
pub fn round_to_hundredths(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Translate one parsed ranking into rank entries.
///
/// Labels that are not in `labels` are dropped, but still occupy their
/// position: in `[Response Z, Response A]` the model behind `A` gets rank 2.
pub fn rank_entries(labels: &LabelMap, ranking: &[Label]) -> Vec<RankEntry> {
    ranking
        .iter()
        .enumerate()
        .filter_map(|(i, label)| {
            labels.get(label).map(|model| RankEntry {
                model: model.to_string(),
                rank: i as u32 + 1,
            })
        })
        .collect()
}

/// Aggregate already-parsed rankings against an explicit label map.
///
/// Entries are sorted ascending by rounded mean rank. The sort is stable, so
/// models with equal means keep the order in which they were first ranked
/// while scanning `rankings` front to back.
pub fn aggregate_with<I>(labels: &LabelMap, rankings: I) -> Vec<AggregateEntry>
where
    I: IntoIterator,
    I::Item: AsRef<[Label]>,
{
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut collected: Vec<(String, Vec<u32>)> = Vec::new();

    for ranking in rankings {
        for entry in rank_entries(labels, ranking.as_ref()) {
            let slot = *first_seen.entry(entry.model.clone()).or_insert_with(|| {
                collected.push((entry.model.clone(), Vec::new()));
                collected.len() - 1
            });
            collected[slot].1.push(entry.rank);
        }
    }

    let mut entries: Vec<AggregateEntry> = collected
        .into_iter()
        .map(|(model, ranks)| {
            let sum: u32 = ranks.iter().sum();
            let count = ranks.len() as u32;
            AggregateEntry {
                model,
                mean_rank: round_to_hundredths(f64::from(sum) / f64::from(count)),
                vote_count: count,
            }
        })
        .collect();

    entries.sort_by(|a, b| a.mean_rank.total_cmp(&b.mean_rank));
    entries
}

/// Build the leaderboard for one request.
///
/// Labels are assigned from `answers` in order, each review's
/// `FINAL RANKING:` section is extracted, and the rankings are combined with
/// [`aggregate_with`]. Reviews without a usable ranking contribute nothing;
/// this never fails.
pub fn aggregate(answers: &[CandidateAnswer], reviews: &[Review]) -> Vec<AggregateEntry> {
    let labels = assign_labels(answers);
    aggregate_with(
        &labels,
        reviews.iter().map(|review| extract_ranking(&review.review)),
    )
}
