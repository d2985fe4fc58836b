//! Infrastructure layer for llm-council
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer:
//!
//! - [`JsonFileConversationStore`]: conversations as JSON files on disk
//! - [`GeminiGateway`]: the chairman model over HTTP (feature `gemini`)
//! - [`JsonlConversationLogger`]: structured event log
//!
//! plus configuration file loading ([`ConfigLoader`]).

pub mod config;
pub mod gateway;
pub mod logging;
pub mod storage;

pub use config::{ConfigLoadError, ConfigLoader, FileConfig};
#[cfg(feature = "gemini")]
pub use gateway::{GeminiGateway, GeminiSettings};
pub use logging::JsonlConversationLogger;
pub use storage::JsonFileConversationStore;
