//! Output format value object

use serde::{Deserialize, Serialize};

/// How council results are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Final answer, leaderboard and every stage
    Full,
    /// Only the final answer and leaderboard (default)
    #[default]
    Synthesis,
    /// JSON output
    Json,
}
