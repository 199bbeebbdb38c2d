//! Session storage configuration from TOML (`[session]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw session configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Resume an interrupted quiz on the next start
    pub resume: bool,
    /// Directory for stored quiz progress and sign-in state
    pub dir: Option<String>,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            resume: true,
            dir: None,
        }
    }
}

impl FileSessionConfig {
    /// Configured directory, or `<data dir>/dpc-diagnostic`
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        match &self.dir {
            Some(dir) => Some(PathBuf::from(dir)),
            None => dirs::data_dir().map(|d| d.join("dpc-diagnostic")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins() {
        let config = FileSessionConfig {
            dir: Some("/tmp/dpc".into()),
            ..Default::default()
        };
        assert_eq!(config.resolved_dir(), Some(PathBuf::from("/tmp/dpc")));
        assert!(config.resume);
    }
}
