//! Port for structured diagnostic event logging.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port records machine-readable
//! events (question resolution, reconciliation, submissions) for later audit.

use serde_json::Value;

/// A structured event for logging.
pub struct DiagnosticEvent {
    /// Event type identifier (e.g., "questions_resolved", "diagnostic_submitted").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl DiagnosticEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging events to a structured log.
///
/// `log` is synchronous and non-fallible; implementations swallow their own
/// write failures.
pub trait EventLogger: Send + Sync {
    fn log(&self, event: DiagnosticEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoEventLogger;

impl EventLogger for NoEventLogger {
    fn log(&self, _event: DiagnosticEvent) {}
}
