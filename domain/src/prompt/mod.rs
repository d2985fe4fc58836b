//! Prompt domain
//!
//! Templates for the prompts sent to reviewers and to the chairman model.

mod template;

pub use template::PromptTemplate;
