//! Structured configuration issues
//!
//! Configuration loaders report problems as [`ConfigIssue`]s instead of
//! failing outright, so the caller can decide whether a warning is enough.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// The backend URL is missing while remote access is requested.
    MissingBackendUrl,
    /// The backend URL is not an http(s) URL.
    InvalidBackendUrl { value: String },
    /// The anon key is empty while remote access is requested.
    MissingApiKey,
    /// A numeric field is outside its accepted range.
    OutOfRange { field: String, value: u64 },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
