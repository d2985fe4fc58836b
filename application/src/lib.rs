//! Application layer for llm-council
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::CouncilConfig;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    conversation_store::{ConversationStore, StoreError},
    progress::{NoProgress, ProgressNotifier, SynthesisStep},
    synthesis_gateway::{GatewayError, SynthesisGateway},
};
pub use use_cases::delete_conversation::{DeleteConversationError, DeleteConversationUseCase};
pub use use_cases::list_conversations::{ListConversationsError, ListConversationsUseCase};
pub use use_cases::load_conversation::{LoadConversationError, LoadConversationUseCase};
pub use use_cases::run_synthesis::{
    RunSynthesisError, RunSynthesisInput, RunSynthesisUseCase, SynthesisOutcome,
};
pub use use_cases::save_conversation::{SaveConversationError, SaveConversationUseCase};
pub use use_cases::shared::ConversationView;
