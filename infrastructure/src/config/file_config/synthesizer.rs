//! Synthesizer configuration from TOML (`[synthesizer]` section)
//!
//! Describes the chairman model endpoint. The API key itself never lives in
//! a config file: `api_key_env` names the environment variable holding it.
//!
//! ```toml
//! [synthesizer]
//! model = "gemini-3-pro-preview"
//! endpoint = "https://example.invalid/v1/models/gemini-3-pro-preview:streamGenerateContent"
//! api_key_env = "GEMINI_CUSTOM_KEY"
//! timeout_seconds = 300
//! ```

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_CUSTOM_KEY";
pub const DEFAULT_ENDPOINT_ENV: &str = "GEMINI_CUSTOM_ENDPOINT";
pub const DEFAULT_MODEL_ENV: &str = "GEMINI_MODEL";

/// Raw synthesizer configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSynthesizerConfig {
    /// Model recorded as the author of every synthesis
    pub model: String,
    /// Generation endpoint; falls back to `$GEMINI_CUSTOM_ENDPOINT`
    pub endpoint: Option<String>,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    pub temperature: f64,
    pub top_p: f64,
    pub max_output_tokens: u32,
    /// Gemini `thinkingLevel` (e.g. "HIGH", "LOW")
    pub thinking_level: String,
    /// Attach the Google Search grounding tool to requests
    pub google_search: bool,
}

impl Default for FileSynthesizerConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_seconds: 300,
            temperature: 1.0,
            top_p: 0.95,
            max_output_tokens: 65535,
            thinking_level: "HIGH".to_string(),
            google_search: true,
        }
    }
}

impl FileSynthesizerConfig {
    /// Configured endpoint, or the one named by `$GEMINI_CUSTOM_ENDPOINT`.
    pub fn resolve_endpoint(&self) -> Option<String> {
        self.endpoint
            .clone()
            .filter(|e| !e.trim().is_empty())
            .or_else(|| std::env::var(DEFAULT_ENDPOINT_ENV).ok())
            .filter(|e| !e.trim().is_empty())
    }

    /// API key read from the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }

    /// `$GEMINI_MODEL` when the config leaves the default in place.
    pub fn resolve_model(&self) -> String {
        if self.model == DEFAULT_MODEL
            && let Ok(model) = std::env::var(DEFAULT_MODEL_ENV)
            && !model.trim().is_empty()
        {
            return model;
        }
        self.model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileSynthesizerConfig::default();
        assert_eq!(config.model, "gemini-3-pro-preview");
        assert_eq!(config.timeout_seconds, 300);
        assert_eq!(config.max_output_tokens, 65535);
        assert_eq!(config.thinking_level, "HIGH");
        assert!(config.google_search);
    }

    #[test]
    fn test_deserialize_partial() {
        let toml_str = r#"
[synthesizer]
model = "gemini-2.5-flash"
endpoint = "http://localhost:9000/generate"
timeout_seconds = 60
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.synthesizer.model, "gemini-2.5-flash");
        assert_eq!(config.synthesizer.resolve_model(), "gemini-2.5-flash");
        assert_eq!(
            config.synthesizer.resolve_endpoint().as_deref(),
            Some("http://localhost:9000/generate")
        );
        assert_eq!(config.synthesizer.timeout_seconds, 60);
        assert_eq!(config.synthesizer.api_key_env, "GEMINI_CUSTOM_KEY");
        assert_eq!(config.synthesizer.top_p, 0.95);
    }

    #[test]
    fn test_api_key_from_unset_variable_is_none() {
        let config = FileSynthesizerConfig {
            api_key_env: "COUNCIL_TEST_SURELY_UNSET_KEY_VARIABLE".to_string(),
            ..Default::default()
        };
        assert!(config.resolve_api_key().is_none());
    }
}
