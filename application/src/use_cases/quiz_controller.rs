//! Quiz controller
//!
//! Drives a [`QuizSession`] for an interactive front end: every transition is
//! persisted through a [`KeyValueStore`] so an interrupted quiz can resume,
//! and answering the last question submits the diagnostic.

use crate::ports::key_value::KeyValueStore;
use crate::use_cases::submit_diagnostic::{SubmitDiagnosticUseCase, SubmitError};
use dpc_domain::{DomainError, QuestionBank, QuizSession, SessionSnapshot, Step, SubmissionOutcome};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Storage key of the persisted session
pub const SESSION_KEY: &str = "dpc.quiz.session";

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("{0}")]
    Navigation(#[from] DomainError),

    #[error("Submission failed: {0}")]
    Submit(#[from] SubmitError),
}

/// What happened after an advance
#[derive(Debug)]
pub enum QuizEvent {
    Moved { index: usize },
    Completed(SubmissionOutcome),
}

pub struct QuizController {
    session: QuizSession,
    storage: Arc<dyn KeyValueStore>,
    submitter: Arc<SubmitDiagnosticUseCase>,
    resumed: bool,
}

impl QuizController {
    /// Start a quiz, resuming a stored session when one fits `bank`
    pub fn start(
        bank: QuestionBank,
        storage: Arc<dyn KeyValueStore>,
        submitter: Arc<SubmitDiagnosticUseCase>,
    ) -> Self {
        let (session, resumed) = match load_snapshot(storage.as_ref()) {
            Some(snapshot) if !snapshot.is_fresh() => {
                match QuizSession::resume(bank.clone(), snapshot) {
                    Ok(session) => {
                        info!("Resuming quiz at question {}", session.index() + 1);
                        (session, true)
                    }
                    Err(e) => {
                        warn!("Discarding stored quiz session: {}", e);
                        if let Err(e) = storage.remove(SESSION_KEY) {
                            warn!("Failed to clear stored session: {}", e);
                        }
                        (QuizSession::new(bank), false)
                    }
                }
            }
            _ => (QuizSession::new(bank), false),
        };

        Self {
            session,
            storage,
            submitter,
            resumed,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Whether the session was restored from storage
    pub fn resumed(&self) -> bool {
        self.resumed
    }

    /// Select an option of the current question; foreign ids are ignored
    pub fn select(&mut self, option_id: &str) -> bool {
        let selected = self.session.select(option_id);
        if selected {
            self.save();
        } else {
            debug!("Ignoring option {} for the current question", option_id);
        }
        selected
    }

    /// Record the selection and move on, submitting after the last question
    ///
    /// A failed submission keeps the session (and its stored copy) on the
    /// last question so the caller can retry.
    pub async fn advance(&mut self) -> Result<QuizEvent, QuizError> {
        match self.session.advance()? {
            Step::Moved { index } => {
                self.save();
                Ok(QuizEvent::Moved { index })
            }
            Step::Finished(answers) => {
                self.save();
                let outcome = self.submitter.execute(&answers).await?;
                self.clear();
                Ok(QuizEvent::Completed(outcome))
            }
        }
    }

    pub fn retreat(&mut self) -> Result<usize, QuizError> {
        let index = self.session.retreat()?;
        self.save();
        Ok(index)
    }

    /// Drop all progress and start over
    pub fn restart(&mut self) {
        self.session = QuizSession::new(self.session.bank().clone());
        self.resumed = false;
        self.clear();
    }

    fn save(&self) {
        let encoded = match serde_json::to_string(&self.session.snapshot()) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!("Failed to encode quiz session: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(SESSION_KEY, &encoded) {
            warn!("Failed to persist quiz session: {}", e);
        }
    }

    fn clear(&self) {
        if let Err(e) = self.storage.remove(SESSION_KEY) {
            warn!("Failed to clear stored session: {}", e);
        }
    }
}

fn load_snapshot(storage: &dyn KeyValueStore) -> Option<SessionSnapshot> {
    let raw = match storage.get(SESSION_KEY) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!("Failed to read stored session: {}", e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("Stored quiz session is unreadable: {}", e);
            None
        }
    }
}
