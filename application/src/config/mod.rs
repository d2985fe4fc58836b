//! Application-level configuration.
//!
//! - [`CouncilConfig`] - auto-save and synthesis timeout

pub mod council_config;

pub use council_config::CouncilConfig;
