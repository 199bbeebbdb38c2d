//! Question resolution and reconciliation policy

/// Number of questions in the published question bank
pub const DEFAULT_EXPECTED_QUESTIONS: usize = 33;

/// Controls how the remote question tables are checked and repopulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPolicy {
    /// Reconcile when the store holds fewer questions than this
    pub expected_question_count: usize,
    /// Write the options of one question concurrently
    pub concurrent_option_writes: bool,
    /// Serve the bundled snapshot when reconciliation fails instead of
    /// reporting an error
    pub fallback_on_sync_failure: bool,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self {
            expected_question_count: DEFAULT_EXPECTED_QUESTIONS,
            concurrent_option_writes: true,
            fallback_on_sync_failure: true,
        }
    }
}

impl SyncPolicy {
    pub fn with_expected_questions(mut self, count: usize) -> Self {
        self.expected_question_count = count;
        self
    }

    pub fn serial_writes(mut self) -> Self {
        self.concurrent_option_writes = false;
        self
    }

    pub fn strict(mut self) -> Self {
        self.fallback_on_sync_failure = false;
        self
    }
}
