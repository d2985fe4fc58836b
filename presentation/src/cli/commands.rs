//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for council results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every stage plus the leaderboard
    Full,
    /// Only the final answer and leaderboard
    Synthesis,
    /// JSON output
    Json,
}

impl From<OutputFormat> for council_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Synthesis => Self::Synthesis,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for llm-council
#[derive(Parser, Debug)]
#[command(name = "llm-council")]
#[command(author, version, about = "LLM Council - peer-ranked answers with a chairman synthesis")]
#[command(long_about = r#"
llm-council turns a set of model answers and anonymized peer reviews into a
ranked leaderboard and a chairman synthesis, and keeps the results as
conversations on disk.

Reviewers see answers as "Response A", "Response B", ... and end their review
with a "FINAL RANKING:" numbered list. Rankings are averaged per model.

Configuration is merged from (highest priority first):
1. COUNCIL_* environment variables (COUNCIL_SYNTHESIZER__MODEL=...)
2. --config <path>
3. ./council.toml
4. ~/.config/llm-council/config.toml

Example:
  llm-council prompt --input request.json > review-prompt.txt
  llm-council rank --input request.json
  llm-council synthesize --input request.json -o full
  llm-council list
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (defaults to the configured format, else synthesis)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding saved conversations
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and the merged configuration, then exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask the chairman model for a final answer, rank the answers, and save
    Synthesize {
        /// Request JSON: {question, stage1_responses, stage2_reviews, id?} ("-" for stdin)
        #[arg(short, long, value_name = "PATH")]
        input: PathBuf,

        /// Do not save the completed conversation
        #[arg(long)]
        no_save: bool,
    },

    /// Compute the peer-ranking leaderboard without calling any model
    Rank {
        /// Request JSON ("-" for stdin)
        #[arg(short, long, value_name = "PATH")]
        input: PathBuf,
    },

    /// Print the anonymized peer-review prompt for a request
    Prompt {
        /// Request JSON ("-" for stdin)
        #[arg(short, long, value_name = "PATH")]
        input: PathBuf,
    },

    /// Save a session JSON as a conversation
    Save {
        /// Session JSON with stage1Responses, stage2Reviews, ... ("-" for stdin)
        #[arg(short, long, value_name = "PATH")]
        input: PathBuf,
    },

    /// List saved conversations, newest first
    List,

    /// Show a saved conversation
    Show {
        /// Conversation id
        id: String,
    },

    /// Delete a saved conversation
    Delete {
        /// Conversation id
        id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_synthesize_with_global_flags() {
        let cli = Cli::try_parse_from([
            "llm-council",
            "synthesize",
            "--input",
            "req.json",
            "--no-save",
            "-o",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Some(Command::Synthesize {
                input: PathBuf::from("req.json"),
                no_save: true,
            })
        );
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_show_and_delete() {
        let cli = Cli::try_parse_from(["llm-council", "show", "abc"]).unwrap();
        assert_eq!(cli.command, Some(Command::Show { id: "abc".into() }));

        let cli = Cli::try_parse_from(["llm-council", "--data-dir", "/tmp/c", "delete", "abc"])
            .unwrap();
        assert_eq!(cli.command, Some(Command::Delete { id: "abc".into() }));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/c")));
    }

    #[test]
    fn test_show_config_without_subcommand() {
        let cli = Cli::try_parse_from(["llm-council", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.command.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_output_format_maps_to_domain() {
        assert_eq!(
            council_domain::OutputFormat::from(OutputFormat::Full),
            council_domain::OutputFormat::Full
        );
        assert_eq!(
            council_domain::OutputFormat::from(OutputFormat::Json),
            council_domain::OutputFormat::Json
        );
    }
}
