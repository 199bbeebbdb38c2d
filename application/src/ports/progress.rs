//! Progress notification port for reconciliation

/// Callback for progress updates while syncing the snapshot into the store
///
/// Implementations live in the presentation layer.
pub trait SyncProgressNotifier: Send + Sync {
    /// Called once before the first question is written
    fn on_sync_start(&self, total_questions: usize);

    /// Called after a question and its options were written
    fn on_question_synced(&self, question_id: &str, success: bool);

    /// Called when every question was processed
    fn on_sync_complete(&self, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoSyncProgress;

impl SyncProgressNotifier for NoSyncProgress {
    fn on_sync_start(&self, _total_questions: usize) {}
    fn on_question_synced(&self, _question_id: &str, _success: bool) {}
    fn on_sync_complete(&self, _success: bool) {}
}
