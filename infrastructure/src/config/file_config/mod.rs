//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod backend;
mod logging;
mod output;
mod quiz;
mod session;

pub use backend::FileBackendConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use quiz::FileQuizConfig;
pub use session::FileSessionConfig;

use dpc_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Remote database and authentication service
    pub backend: FileBackendConfig,
    /// Question resolution and sync behavior
    pub quiz: FileQuizConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Quiz resumption settings
    pub session: FileSessionConfig,
    /// File logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Remote-only requirements (URL and key present) are checked separately
    /// by [`FileBackendConfig::validate_remote`].
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.backend.validate());
        issues.extend(self.quiz.validate());
        issues
    }
}
