//! Key-value storage port used for session resumption

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyValueError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Small synchronous string store (local files, browser-like storage, ...)
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueError>;

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueError>;

    fn remove(&self, key: &str) -> Result<(), KeyValueError>;
}

/// Storage that never keeps anything (resumption disabled)
pub struct NoStorage;

impl KeyValueStore for NoStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, KeyValueError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), KeyValueError> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), KeyValueError> {
        Ok(())
    }
}
