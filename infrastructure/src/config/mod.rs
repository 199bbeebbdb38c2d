//! Configuration file loading for dpc-diagnostic
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `DPC_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./dpc.toml` or `./.dpc.toml`
//! 4. Global: `~/.config/dpc-diagnostic/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileBackendConfig, FileConfig, FileLoggingConfig, FileOutputConfig, FileOutputFormat,
    FileQuizConfig, FileSessionConfig,
};
pub use loader::ConfigLoader;
