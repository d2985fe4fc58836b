//! Presentation layer for llm-council
//!
//! This crate contains CLI definitions, output formatters,
//! and progress reporters.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

use council_domain::OutputFormat as DomainOutputFormat;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use config::OutputConfig;
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use output::json::JsonFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};

/// Formatter for the resolved output format.
pub fn formatter_for(format: DomainOutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        DomainOutputFormat::Json => Box::new(JsonFormatter),
        DomainOutputFormat::Full => Box::new(ConsoleFormatter::full()),
        DomainOutputFormat::Synthesis => Box::new(ConsoleFormatter::concise()),
    }
}
