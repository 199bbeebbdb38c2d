//! Diagnostic result value objects

use crate::profile::Profile;
use crate::scoring::Tally;
use serde::{Deserialize, Serialize};

/// The computed outcome of a finished quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticResult {
    /// Winning profile slug
    pub winner: String,
    /// Full per-slug tally
    pub tally: Tally,
    /// Resolved profile record for `winner`
    pub profile: Profile,
}

/// A non-fatal problem that occurred while submitting a diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmissionWarning {
    /// Writing the per-answer response records failed
    ResponsesNotSaved { reason: String },
}

impl std::fmt::Display for SubmissionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionWarning::ResponsesNotSaved { reason } => {
                write!(f, "responses were not saved: {}", reason)
            }
        }
    }
}

/// A successful submission together with any non-fatal warnings
///
/// Lets callers tell "saved with a minor issue" apart from total failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub result: DiagnosticResult,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SubmissionWarning>,
}

impl SubmissionOutcome {
    pub fn new(result: DiagnosticResult) -> Self {
        Self {
            result,
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: SubmissionWarning) -> Self {
        self.warnings.push(warning);
        self
    }

    /// True when nothing went wrong at all
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
