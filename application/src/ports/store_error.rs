//! Errors shared by the remote store ports

use thiserror::Error;

/// Errors that can occur while talking to the remote data store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Timeout")]
    Timeout,
}

impl StoreError {
    /// Whether the failure is transient (worth retrying later)
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Unavailable(_) | StoreError::Timeout => true,
            StoreError::Rejected { status, .. } => *status >= 500,
            StoreError::Decode(_) => false,
        }
    }
}
