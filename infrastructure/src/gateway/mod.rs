//! **Synthesis gateways**: adapters for the chairman model.
//!
//! # Feature Gate
//!
//! The Gemini adapter needs an HTTP client and is only available when the
//! `gemini` feature is enabled (on by default):
//!
//! ```toml
//! # infrastructure/Cargo.toml
//! [features]
//! gemini = ["dep:reqwest"]
//! ```

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiGateway, GeminiSettings};
