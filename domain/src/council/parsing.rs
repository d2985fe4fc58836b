//! Ranking extraction from free-form peer reviews.
//!
//! Reviewers are asked to end their review with a section like:
//!
//! ```text
//! FINAL RANKING:
//! 1. Response C
//! 2. Response A
//! 3. Response B
//! ```
//!
//! [`extract_ranking`] pulls the labels out of that section. It is a total
//! function: review text is untrusted prose, so anything that does not match
//! the expected shape is skipped rather than reported.

use super::label::Label;
use regex::Regex;
use std::sync::LazyLock;

/// Marker that opens the ranking section (matched case-insensitively)
pub const FINAL_RANKING_MARKER: &str = "FINAL RANKING:";

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)FINAL RANKING:").expect("marker pattern is valid"));

// "<digits>.<optional space>Response <letter>", anything may follow the letter
static RANKING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\.\s*(?i-u:response) ([A-Za-z])").expect("ranking line pattern is valid")
});

/// Extract the ordered labels from a review's `FINAL RANKING:` section.
///
/// - Everything after the first occurrence of the marker is scanned line by
///   line; text before it is ignored.
/// - A line counts if, once trimmed, it starts with a number, a period and a
///   `Response X` label. Other lines are skipped.
/// - Labels are returned in line order. The numeric prefix is not used for
///   ordering, and duplicates are kept.
///
/// Returns an empty list when the marker is missing.
///
/// # Examples
///
/// ```
/// use council_domain::council::parsing::extract_ranking;
///
/// let ranking = extract_ranking("Good answers.\n\nFINAL RANKING:\n1. Response B\n2. response a");
/// let labels: Vec<String> = ranking.iter().map(|l| l.to_string()).collect();
/// assert_eq!(labels, vec!["Response B", "Response A"]);
///
/// assert!(extract_ranking("No ranking here").is_empty());
/// ```
pub fn extract_ranking(text: &str) -> Vec<Label> {
    let Some(marker) = MARKER.find(text) else {
        return Vec::new();
    };

    text[marker.end()..]
        .lines()
        .filter_map(|line| {
            let captures = RANKING_LINE.captures(line.trim())?;
            let letter = captures.get(1)?.as_str().chars().next()?;
            Label::from_letter(letter)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(text: &str) -> Vec<String> {
        extract_ranking(text).iter().map(Label::to_string).collect()
    }

    #[test]
    fn test_no_marker_returns_empty() {
        assert!(extract_ranking("").is_empty());
        assert!(extract_ranking("1. Response A\n2. Response B").is_empty());
        assert!(extract_ranking("FINAL RANKING\n1. Response A").is_empty());
    }

    #[test]
    fn test_skips_junk_and_normalizes_case() {
        let text = "FINAL RANKING:\n1. Response B\n2. Response A\nignored junk\n3. response c";
        assert_eq!(labels(text), vec!["Response B", "Response A", "Response C"]);
    }

    #[test]
    fn test_marker_is_case_insensitive() {
        assert_eq!(labels("final ranking:\n1. Response A"), vec!["Response A"]);
        assert_eq!(labels("Final Ranking:\n1. RESPONSE A"), vec!["Response A"]);
    }

    #[test]
    fn test_text_before_marker_is_ignored() {
        let text = "\
Response A provides good detail but misses Y.
1. Response B looked weaker at first.

FINAL RANKING:
1. Response C
2. Response A
3. Response B";
        assert_eq!(labels(text), vec!["Response C", "Response A", "Response B"]);
    }

    #[test]
    fn test_line_order_wins_over_numbers() {
        let text = "FINAL RANKING:\n2. Response A\n1. Response B";
        assert_eq!(labels(text), vec!["Response A", "Response B"]);
    }

    #[test]
    fn test_duplicates_are_preserved() {
        let text = "FINAL RANKING:\n1. Response A\n2. Response A\n3. Response B";
        assert_eq!(labels(text), vec!["Response A", "Response A", "Response B"]);
    }

    #[test]
    fn test_whitespace_variants() {
        let text = "FINAL RANKING:\n   1.Response A   \n\t2.   Response B\r\n10. Response C";
        assert_eq!(labels(text), vec!["Response A", "Response B", "Response C"]);
    }

    #[test]
    fn test_trailing_commentary_after_label_is_tolerated() {
        let text = "FINAL RANKING:\n1. Response B - clearest explanation\n2. Response A (too short)";
        assert_eq!(labels(text), vec!["Response B", "Response A"]);
    }

    #[test]
    fn test_lines_without_number_or_period_are_skipped() {
        let text = "FINAL RANKING:\n- Response A\nResponse B\n1) Response C\n1 Response D\n2. Response E";
        assert_eq!(labels(text), vec!["Response E"]);
    }

    #[test]
    fn test_letters_outside_candidate_set_are_kept() {
        // The extractor has no idea how many candidates exist
        let text = "FINAL RANKING:\n1. Response Z\n2. Response A";
        assert_eq!(labels(text), vec!["Response Z", "Response A"]);
    }

    #[test]
    fn test_only_first_marker_opens_the_section() {
        let text = "FINAL RANKING:\n1. Response A\nFINAL RANKING:\n1. Response B";
        assert_eq!(labels(text), vec!["Response A", "Response B"]);
    }

    #[test]
    fn test_marker_without_lines() {
        assert!(extract_ranking("FINAL RANKING:").is_empty());
        assert!(extract_ranking("FINAL RANKING: none of them were good").is_empty());
    }
}
