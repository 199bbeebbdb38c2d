//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for diagnostic results
///
/// This is a domain concept representing how the output should be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Full profile description with the score breakdown
    Full,
    /// Winning profile name and scores only (default)
    #[default]
    Summary,
    /// JSON output
    Json,
}
