//! Resolve Questions use case
//!
//! Produces the ordered question bank for a quiz session. The remote store is
//! preferred; when it is incomplete the bundled snapshot is synced into it
//! first, and whenever the store cannot serve a usable bank the snapshot is
//! returned verbatim instead.

use super::reconcile_questions::ReconcileQuestionsUseCase;
use crate::config::SyncPolicy;
use crate::ports::event_logger::{DiagnosticEvent, EventLogger, NoEventLogger};
use crate::ports::progress::{NoSyncProgress, SyncProgressNotifier};
use crate::ports::question_store::{OptionRecord, QuestionStore};
use crate::ports::snapshot_source::{QuestionSnapshotSource, SnapshotError};
use crate::ports::store_error::StoreError;
use dpc_domain::{DomainError, Question, QuestionBank};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that leave the session without any questions
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Failed to load the question snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Question snapshot is invalid: {0}")]
    InvalidSnapshot(#[from] DomainError),

    #[error("Question reconciliation failed: {0}")]
    SyncFailed(String),
}

/// Where the session's questions came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSource {
    Remote,
    Snapshot,
}

impl std::fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionSource::Remote => write!(f, "remote store"),
            QuestionSource::Snapshot => write!(f, "bundled snapshot"),
        }
    }
}

/// Output of the resolver
#[derive(Debug, Clone)]
pub struct ResolvedQuestions {
    pub bank: QuestionBank,
    pub source: QuestionSource,
    /// Whether reconciliation ran during this resolution
    pub reconciled: bool,
}

/// Use case for resolving the question bank of a session
pub struct ResolveQuestionsUseCase<S: QuestionStore + 'static> {
    store: Arc<S>,
    snapshot: Arc<dyn QuestionSnapshotSource>,
    reconcile: ReconcileQuestionsUseCase<S>,
    policy: SyncPolicy,
    logger: Arc<dyn EventLogger>,
}

impl<S: QuestionStore + 'static> ResolveQuestionsUseCase<S> {
    pub fn new(store: Arc<S>, snapshot: Arc<dyn QuestionSnapshotSource>) -> Self {
        Self {
            reconcile: ReconcileQuestionsUseCase::new(Arc::clone(&store), Arc::clone(&snapshot)),
            store,
            snapshot,
            policy: SyncPolicy::default(),
            logger: Arc::new(NoEventLogger),
        }
    }

    pub fn with_policy(mut self, policy: SyncPolicy) -> Self {
        self.reconcile = self.reconcile.with_policy(policy.clone());
        self.policy = policy;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn EventLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Resolve without progress reporting
    pub async fn execute(&self) -> Result<ResolvedQuestions, ResolveError> {
        self.execute_with_progress(&NoSyncProgress).await
    }

    /// Resolve, reporting reconciliation progress if it runs
    pub async fn execute_with_progress(
        &self,
        progress: &dyn SyncProgressNotifier,
    ) -> Result<ResolvedQuestions, ResolveError> {
        info!("Resolving question bank");

        let reconciled = self.needs_reconciliation().await;
        if reconciled {
            info!("Remote question tables are incomplete, reconciling from snapshot");
            let outcome = match self.reconcile.execute_with_progress(progress).await {
                Ok(report) if report.is_success() => Ok(()),
                Ok(report) => Err(report.summary()),
                Err(e) => Err(e.to_string()),
            };
            if let Err(reason) = outcome {
                if !self.policy.fallback_on_sync_failure {
                    return Err(ResolveError::SyncFailed(reason));
                }
                warn!("Reconciliation failed ({}), serving bundled snapshot", reason);
                return self.from_snapshot(reconciled);
            }
        }

        match self.read_remote().await {
            Ok(questions) if !questions.is_empty() => match QuestionBank::new(questions) {
                Ok(bank) => Ok(self.finish(bank, QuestionSource::Remote, reconciled)),
                Err(e) => {
                    warn!("Remote questions are inconsistent ({}), serving bundled snapshot", e);
                    self.from_snapshot(reconciled)
                }
            },
            Ok(_) => {
                warn!("No remote question has options, serving bundled snapshot");
                self.from_snapshot(reconciled)
            }
            Err(e) => {
                warn!("Failed to read remote questions ({}), serving bundled snapshot", e);
                self.from_snapshot(reconciled)
            }
        }
    }

    /// Whether the remote tables must be re-populated before reading
    async fn needs_reconciliation(&self) -> bool {
        let questions = self.store.count_questions().await;
        let options = self.store.count_options().await;

        match (questions, options) {
            (Ok(0), _) | (_, Ok(0)) => {
                debug!("Remote question tables are empty");
                true
            }
            (Ok(q), Ok(_)) if q < self.policy.expected_question_count => {
                info!(
                    "Only {} questions stored, expected {}",
                    q, self.policy.expected_question_count
                );
                true
            }
            (Ok(_), Ok(_)) => false,
            (Err(e), _) | (_, Err(e)) => {
                warn!("Could not count remote questions: {}", e);
                true
            }
        }
    }

    /// Join options to their questions, dropping questions without options
    async fn read_remote(&self) -> Result<Vec<Question>, StoreError> {
        let question_rows = self.store.list_questions().await?;
        debug!("Fetched {} remote questions", question_rows.len());
        if question_rows.is_empty() {
            return Ok(Vec::new());
        }

        let option_rows = self.store.list_options().await?;
        debug!("Fetched {} remote options", option_rows.len());

        let mut by_question: HashMap<String, Vec<OptionRecord>> = HashMap::new();
        for option in option_rows {
            by_question
                .entry(option.question_id.clone())
                .or_default()
                .push(option);
        }

        let total = question_rows.len();
        let questions: Vec<Question> = question_rows
            .into_iter()
            .map(|row| Question {
                options: by_question
                    .remove(&row.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(OptionRecord::into_option)
                    .collect(),
                id: row.id,
                text: row.text,
            })
            .filter(Question::has_options)
            .collect();

        if questions.len() < total {
            debug!(
                "Dropped {} remote questions without options",
                total - questions.len()
            );
        }
        Ok(questions)
    }

    fn from_snapshot(&self, reconciled: bool) -> Result<ResolvedQuestions, ResolveError> {
        let questions = self.snapshot.load()?;
        let bank = QuestionBank::new(questions)?;
        Ok(self.finish(bank, QuestionSource::Snapshot, reconciled))
    }

    fn finish(
        &self,
        bank: QuestionBank,
        source: QuestionSource,
        reconciled: bool,
    ) -> ResolvedQuestions {
        info!("Serving {} questions from the {}", bank.len(), source);
        self.logger.log(DiagnosticEvent::new(
            "questions_resolved",
            serde_json::json!({
                "source": source,
                "questions": bank.len(),
                "options": bank.option_count(),
                "reconciled": reconciled,
            }),
        ));
        ResolvedQuestions {
            bank,
            source,
            reconciled,
        }
    }
}
