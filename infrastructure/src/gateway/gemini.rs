//! Gemini `generateContent` adapter.
//!
//! Sends the synthesis prompt as a single user turn and concatenates every
//! text part of the reply. The endpoint may answer with one response object
//! or, for `streamGenerateContent`, with a JSON array of chunks.

use crate::config::FileSynthesizerConfig;
use async_trait::async_trait;
use council_application::ports::synthesis_gateway::{GatewayError, SynthesisGateway};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Harm categories whose filters are switched off
const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_HARASSMENT",
];

/// Longest error body quoted back in a `RequestFailed`
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Resolved connection and generation settings
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub model: String,
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
    pub temperature: f64,
    pub top_p: f64,
    pub max_output_tokens: u32,
    pub thinking_level: String,
    pub google_search: bool,
}

impl GeminiSettings {
    /// Resolve settings, reading the endpoint and key from the environment
    /// where the config points there.
    pub fn from_config(config: &FileSynthesizerConfig) -> Result<Self, GatewayError> {
        let endpoint = config.resolve_endpoint().ok_or_else(|| {
            GatewayError::NotConfigured(
                "no endpoint: set synthesizer.endpoint or GEMINI_CUSTOM_ENDPOINT".to_string(),
            )
        })?;
        let api_key = config.resolve_api_key().ok_or_else(|| {
            GatewayError::NotConfigured(format!("no API key in ${}", config.api_key_env))
        })?;

        Ok(Self {
            model: config.resolve_model(),
            endpoint,
            api_key,
            timeout: Duration::from_secs(config.timeout_seconds),
            temperature: config.temperature,
            top_p: config.top_p,
            max_output_tokens: config.max_output_tokens,
            thinking_level: config.thinking_level.clone(),
            google_search: config.google_search,
        })
    }
}

// ==================== Wire types ====================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
    safety_settings: Vec<SafetySetting>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    temperature: f64,
    max_output_tokens: u32,
    top_p: f64,
    thinking_config: ThinkingConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig<'a> {
    thinking_level: &'a str,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Chunks(Vec<ResponseChunk>),
    Single(ResponseChunk),
}

#[derive(Debug, Default, Deserialize)]
struct ResponseChunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// All text parts, in order, concatenated.
    fn into_text(self) -> String {
        let chunks = match self {
            GenerateResponse::Chunks(chunks) => chunks,
            GenerateResponse::Single(chunk) => vec![chunk],
        };

        chunks
            .into_iter()
            .flat_map(|chunk| chunk.candidates)
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .filter_map(|part| part.text)
            .collect()
    }
}

// ==================== Gateway ====================

/// [`SynthesisGateway`] speaking the Gemini REST protocol
pub struct GeminiGateway {
    client: reqwest::Client,
    settings: GeminiSettings,
}

impl GeminiGateway {
    pub fn new(settings: GeminiSettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| GatewayError::NotConfigured(format!("HTTP client: {}", e)))?;
        Ok(Self { client, settings })
    }

    pub fn from_config(config: &FileSynthesizerConfig) -> Result<Self, GatewayError> {
        Self::new(GeminiSettings::from_config(config)?)
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                max_output_tokens: self.settings.max_output_tokens,
                top_p: self.settings.top_p,
                thinking_config: ThinkingConfig {
                    thinking_level: &self.settings.thinking_level,
                },
            },
            safety_settings: HARM_CATEGORIES
                .iter()
                .map(|&category| SafetySetting {
                    category,
                    threshold: "OFF",
                })
                .collect(),
            tools: if self.settings.google_search {
                vec![Tool {
                    google_search: serde_json::Map::new(),
                }]
            } else {
                Vec::new()
            },
        }
    }
}

/// The request URL carries the API key, so it is stripped from the message.
fn map_transport_error(e: reqwest::Error) -> GatewayError {
    let e = e.without_url();
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl SynthesisGateway for GeminiGateway {
    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        info!("Requesting synthesis from {}", self.settings.model);
        debug!("Synthesis prompt is {} bytes", prompt.len());

        let response = self
            .client
            .post(&self.settings.endpoint)
            .query(&[("key", self.settings.api_key.as_str())])
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            let excerpt: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                excerpt
            )));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        let text = parsed.into_text();
        debug!("Synthesis returned {} bytes", text.len());
        Ok(text)
    }
}
