//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod delete_conversation;
pub mod list_conversations;
pub mod load_conversation;
pub mod run_synthesis;
pub mod save_conversation;
pub mod shared;

#[cfg(test)]
pub(crate) mod test_support;
