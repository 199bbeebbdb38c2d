//! Quiz configuration from TOML (`[quiz]` section)

use dpc_application::{DEFAULT_EXPECTED_QUESTIONS, SyncPolicy};
use dpc_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Raw quiz configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQuizConfig {
    /// Reconcile when the store holds fewer questions than this
    pub expected_questions: usize,
    /// Snapshot file to use instead of the bundled one
    pub snapshot_path: Option<String>,
    /// Write the options of one question concurrently during sync
    pub concurrent_option_writes: bool,
    /// Serve the snapshot when sync fails instead of aborting
    pub fallback_on_sync_failure: bool,
}

impl Default for FileQuizConfig {
    fn default() -> Self {
        Self {
            expected_questions: DEFAULT_EXPECTED_QUESTIONS,
            snapshot_path: None,
            concurrent_option_writes: true,
            fallback_on_sync_failure: true,
        }
    }
}

impl FileQuizConfig {
    pub fn to_sync_policy(&self) -> SyncPolicy {
        SyncPolicy {
            expected_question_count: self.expected_questions,
            concurrent_option_writes: self.concurrent_option_writes,
            fallback_on_sync_failure: self.fallback_on_sync_failure,
        }
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        if self.expected_questions > 0 {
            return Vec::new();
        }
        vec![ConfigIssue {
            severity: Severity::Error,
            code: ConfigIssueCode::OutOfRange {
                field: "quiz.expected_questions".to_string(),
                value: 0,
            },
            message: "quiz.expected_questions must be at least 1".to_string(),
        }]
    }
}
