//! Configuration file loading for llm-council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COUNCIL_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./council.toml`
//! 4. Global: `$XDG_CONFIG_HOME/llm-council/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    APP_DIR_NAME, FileConfig, FileLoggingConfig, FileOutputConfig, FileOutputFormat,
    FileStorageConfig, FileSynthesizerConfig,
};
pub use loader::{ConfigLoadError, ConfigLoader, ENV_PREFIX, PROJECT_CONFIG_FILE};
