//! Council behavior configuration.

use std::time::Duration;

/// Controls how the council use cases behave.
#[derive(Debug, Clone)]
pub struct CouncilConfig {
    /// Save every completed synthesis as a conversation
    pub auto_save: bool,
    /// Maximum time to wait for the synthesis model
    pub timeout: Option<Duration>,
}

impl Default for CouncilConfig {
    fn default() -> Self {
        Self {
            auto_save: true,
            timeout: None,
        }
    }
}

impl CouncilConfig {
    /// Creates a config from an optional timeout in seconds.
    ///
    /// If `seconds` is `None`, no timeout is applied.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.map(Duration::from_secs),
            ..Default::default()
        }
    }

    pub fn without_auto_save(mut self) -> Self {
        self.auto_save = false;
        self
    }
}
