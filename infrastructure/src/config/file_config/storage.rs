//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directory name used under the platform data dir
pub const APP_DIR_NAME: &str = "llm-council";

/// Raw storage configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Directory holding one `<id>.json` file per conversation
    pub data_dir: Option<String>,
}

impl FileStorageConfig {
    /// Configured directory, else `<platform data dir>/llm-council/conversations`,
    /// else `./data/conversations`.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return PathBuf::from(dir);
        }
        dirs::data_dir()
            .map(|d| d.join(APP_DIR_NAME).join("conversations"))
            .unwrap_or_else(|| PathBuf::from("data").join("conversations"))
    }
}
