//! Output formatter trait

use dpc_domain::{OutputFormat, SubmissionOutcome};

/// Trait for formatting diagnostic results
pub trait OutputFormatter {
    /// Format the complete result with the profile description
    fn format_full(&self, outcome: &SubmissionOutcome) -> String;

    /// Format the winning profile and scores only
    fn format_summary(&self, outcome: &SubmissionOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &SubmissionOutcome) -> String;

    /// Dispatch on the configured format
    fn format(&self, outcome: &SubmissionOutcome, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format_full(outcome),
            OutputFormat::Summary => self.format_summary(outcome),
            OutputFormat::Json => self.format_json(outcome),
        }
    }
}
