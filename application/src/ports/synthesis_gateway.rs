//! Synthesis gateway port
//!
//! Defines the interface to the chairman model that writes the final
//! answer. The gateway returns already-extracted text; request building,
//! timeouts and network errors are the adapter's concern.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while requesting a completion
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Gateway not configured: {0}")]
    NotConfigured(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Completion endpoint used for the final synthesis
#[async_trait]
pub trait SynthesisGateway: Send + Sync {
    /// Identity of the model behind this gateway, recorded with the
    /// synthesis when a conversation is saved
    fn model(&self) -> &str;

    /// Send `prompt` and return the generated text.
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}
