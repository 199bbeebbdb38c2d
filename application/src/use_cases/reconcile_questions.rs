//! Reconcile Questions use case
//!
//! Re-populates the remote question and option tables from the bundled
//! snapshot. Every write is an upsert by id, so running it repeatedly leaves
//! the tables in the same state as running it once.

use crate::config::SyncPolicy;
use crate::ports::progress::{NoSyncProgress, SyncProgressNotifier};
use crate::ports::question_store::{OptionRecord, QuestionRecord, QuestionStore};
use crate::ports::snapshot_source::{QuestionSnapshotSource, SnapshotError};
use crate::ports::store_error::StoreError;
use dpc_domain::Question;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that prevent reconciliation from starting
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Which kind of row a failed write targeted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Question,
    Option,
}

/// A single failed upsert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncFailure {
    pub kind: RecordKind,
    pub id: String,
    pub reason: String,
}

/// Summary of one reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub questions_synced: usize,
    pub options_synced: usize,
    pub failures: Vec<SyncFailure>,
}

impl ReconcileReport {
    /// Success requires every write to have succeeded
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable one-line summary
    pub fn summary(&self) -> String {
        if self.is_success() {
            format!(
                "{} questions and {} options synchronized",
                self.questions_synced, self.options_synced
            )
        } else {
            format!(
                "{} questions and {} options synchronized, {} failed",
                self.questions_synced,
                self.options_synced,
                self.failures.len()
            )
        }
    }
}

/// Use case for syncing the snapshot into the remote store
pub struct ReconcileQuestionsUseCase<S: QuestionStore + 'static> {
    store: Arc<S>,
    snapshot: Arc<dyn QuestionSnapshotSource>,
    policy: SyncPolicy,
}

impl<S: QuestionStore + 'static> ReconcileQuestionsUseCase<S> {
    pub fn new(store: Arc<S>, snapshot: Arc<dyn QuestionSnapshotSource>) -> Self {
        Self {
            store,
            snapshot,
            policy: SyncPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: SyncPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Load the snapshot and sync it without progress reporting
    pub async fn execute(&self) -> Result<ReconcileReport, ReconcileError> {
        self.execute_with_progress(&NoSyncProgress).await
    }

    /// Load the snapshot and sync it, reporting progress
    pub async fn execute_with_progress(
        &self,
        progress: &dyn SyncProgressNotifier,
    ) -> Result<ReconcileReport, ReconcileError> {
        let questions = self.snapshot.load()?;
        Ok(self.reconcile(&questions, progress).await)
    }

    /// Upsert the given questions and their options
    ///
    /// A failed question write skips that question's options. Failures are
    /// logged and collected; they never abort the run.
    pub async fn reconcile(
        &self,
        questions: &[Question],
        progress: &dyn SyncProgressNotifier,
    ) -> ReconcileReport {
        info!("Reconciling {} questions into the store", questions.len());
        progress.on_sync_start(questions.len());

        let mut report = ReconcileReport::default();

        for question in questions {
            let record = QuestionRecord::from_question(question);
            if let Err(e) = self.store.upsert_question(&record).await {
                warn!("Failed to sync question {}: {}", question.id, e);
                report.failures.push(SyncFailure {
                    kind: RecordKind::Question,
                    id: question.id.clone(),
                    reason: e.to_string(),
                });
                progress.on_question_synced(&question.id, false);
                continue;
            }
            report.questions_synced += 1;
            debug!("Question {} synced", question.id);

            let options: Vec<OptionRecord> = question
                .options
                .iter()
                .map(|o| OptionRecord::from_option(&question.id, o))
                .collect();

            let results = self.write_options(&options).await;

            let mut question_ok = true;
            for (option, result) in options.iter().zip(results) {
                match result {
                    Ok(()) => {
                        report.options_synced += 1;
                        debug!("Option {} synced", option.id);
                    }
                    Err(e) => {
                        warn!("Failed to sync option {}: {}", option.id, e);
                        question_ok = false;
                        report.failures.push(SyncFailure {
                            kind: RecordKind::Option,
                            id: option.id.clone(),
                            reason: e.to_string(),
                        });
                    }
                }
            }
            progress.on_question_synced(&question.id, question_ok);
        }

        progress.on_sync_complete(report.is_success());
        info!("Reconciliation finished: {}", report.summary());
        report
    }

    async fn write_options(&self, options: &[OptionRecord]) -> Vec<Result<(), StoreError>> {
        if self.policy.concurrent_option_writes {
            join_all(options.iter().map(|o| self.store.upsert_option(o))).await
        } else {
            let mut results = Vec::with_capacity(options.len());
            for option in options {
                results.push(self.store.upsert_option(option).await);
            }
            results
        }
    }
}
