//! Bundled question snapshot port

use dpc_domain::Question;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Snapshot unavailable: {0}")]
    Unavailable(String),

    #[error("Snapshot is malformed: {0}")]
    Malformed(String),
}

/// Source of the static question snapshot
///
/// Serves as fallback data and as the seed for reconciliation.
pub trait QuestionSnapshotSource: Send + Sync {
    fn load(&self) -> Result<Vec<Question>, SnapshotError>;
}
