//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod logging;
mod output;
mod storage;
mod synthesizer;

pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use storage::{APP_DIR_NAME, FileStorageConfig};
pub use synthesizer::FileSynthesizerConfig;

use council_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chairman model settings
    pub synthesizer: FileSynthesizerConfig,
    /// Conversation storage settings
    pub storage: FileStorageConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Structured event log settings
    pub logging: FileLoggingConfig,
    /// Save every completed synthesis
    #[serde(default = "default_auto_save")]
    pub auto_save: bool,
}

fn default_auto_save() -> bool {
    true
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.synthesizer.model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "synthesizer.model".to_string(),
                },
                "synthesizer.model cannot be empty",
            ));
        }

        if self.synthesizer.api_key_env.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "synthesizer.api_key_env".to_string(),
                },
                "synthesizer.api_key_env cannot be empty",
            ));
        }

        if self.synthesizer.timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "synthesizer.timeout_seconds".to_string(),
                },
                "synthesizer.timeout_seconds cannot be 0",
            ));
        }

        if !(0.0..=2.0).contains(&self.synthesizer.temperature) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "synthesizer.temperature".to_string(),
                },
                format!(
                    "synthesizer.temperature {} is outside 0.0..=2.0",
                    self.synthesizer.temperature
                ),
            ));
        }

        if self.synthesizer.max_output_tokens == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::OutOfRange {
                    field: "synthesizer.max_output_tokens".to_string(),
                },
                "synthesizer.max_output_tokens cannot be 0",
            ));
        }

        if let Some(dir) = &self.storage.data_dir
            && dir.trim().is_empty()
        {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "storage.data_dir".to_string(),
                },
                "storage.data_dir cannot be empty",
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{OutputFormat, Severity};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
auto_save = false

[synthesizer]
model = "gemini-2.5-pro"
timeout_seconds = 120
temperature = 0.7
max_output_tokens = 8192

[storage]
data_dir = "/var/lib/council"

[output]
format = "full"
color = false

[logging]
conversation_log = "council.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.synthesizer.model, "gemini-2.5-pro");
        assert_eq!(config.synthesizer.timeout_seconds, 120);
        assert_eq!(config.synthesizer.max_output_tokens, 8192);
        assert_eq!(config.storage.data_dir.as_deref(), Some("/var/lib/council"));
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert_eq!(config.logging.conversation_log.as_deref(), Some("council.jsonl"));
        assert!(!config.auto_save);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[output]\ncolor = false\n").unwrap();
        assert!(!config.output.color);
        // Defaults should apply
        assert_eq!(config.synthesizer, FileSynthesizerConfig::default());
        assert!(config.storage.data_dir.is_none());
        assert!(config.auto_save);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let mut config = FileConfig::default();
        config.synthesizer.model = " ".to_string();
        config.synthesizer.timeout_seconds = 0;
        config.synthesizer.temperature = 3.5;
        config.storage.data_dir = Some(String::new());

        let issues = config.validate();
        assert_eq!(issues.len(), 4);
        assert_eq!(
            issues.iter().filter(|i| i.severity == Severity::Warning).count(),
            1
        );
        assert!(issues.iter().any(|i| i.code
            == ConfigIssueCode::OutOfRange {
                field: "synthesizer.timeout_seconds".to_string()
            }));
    }
}
