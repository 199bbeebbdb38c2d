//! Diagnostic outcome types

pub mod result;

pub use result::{DiagnosticResult, SubmissionOutcome, SubmissionWarning};
