//! Quiz navigation state machine
//!
//! A session is positioned at a question index `i` in `[0, N)` and holds the
//! answers recorded so far, one per question from the start. Moving backwards
//! never deletes answers: it only restores the recorded choice as the pending
//! selection, so a later advance replaces it in place.

use super::answer::Answer;
use super::snapshot::SessionSnapshot;
use crate::core::error::DomainError;
use crate::question::{Question, QuestionBank};

/// Result of [`QuizSession::advance`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Moved to the question at `index`
    Moved { index: usize },
    /// The last question was answered; these are the answers to submit
    Finished(Vec<Answer>),
}

impl Step {
    pub fn is_finished(&self) -> bool {
        matches!(self, Step::Finished(_))
    }
}

/// In-memory state of one quiz session
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: QuestionBank,
    index: usize,
    answers: Vec<Answer>,
    selected: Option<String>,
}

impl QuizSession {
    /// Start a fresh session at the first question
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            index: 0,
            answers: Vec::new(),
            selected: None,
        }
    }

    /// Rebuild a session from a persisted snapshot
    ///
    /// Fails with [`DomainError::SnapshotMismatch`] when the snapshot does not
    /// fit the bank (the question list changed since it was saved).
    pub fn resume(bank: QuestionBank, snapshot: SessionSnapshot) -> Result<Self, DomainError> {
        let SessionSnapshot {
            index,
            answers,
            selected_option,
        } = snapshot;

        if index >= bank.len() {
            return Err(DomainError::SnapshotMismatch(format!(
                "index {} out of range for {} questions",
                index,
                bank.len()
            )));
        }
        if answers.len() > bank.len() || answers.len() < index {
            return Err(DomainError::SnapshotMismatch(format!(
                "{} answers recorded at index {}",
                answers.len(),
                index
            )));
        }
        for (question, answer) in bank.iter().zip(&answers) {
            if question.id != answer.question_id {
                return Err(DomainError::SnapshotMismatch(format!(
                    "answer for {} recorded where {} is expected",
                    answer.question_id, question.id
                )));
            }
        }

        let mut session = Self {
            bank,
            index,
            answers,
            selected: None,
        };
        match selected_option {
            Some(id) => {
                if !session.select(&id) {
                    return Err(DomainError::SnapshotMismatch(format!(
                        "option {} does not belong to the current question",
                        id
                    )));
                }
            }
            None => session.restore_selection(),
        }
        Ok(session)
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Current question index (0-based)
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.bank.len()
    }

    pub fn current_question(&self) -> &Question {
        // index is kept in [0, N) and the bank is never empty
        &self.bank.questions()[self.index]
    }

    /// Pending option id for the current question
    pub fn selected_option(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn answer_at(&self, index: usize) -> Option<&Answer> {
        self.answers.get(index)
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.bank.len()
    }

    /// Mark `option_id` as the pending selection
    ///
    /// Returns `false` and leaves the state untouched when the option does not
    /// belong to the current question.
    pub fn select(&mut self, option_id: &str) -> bool {
        if self.current_question().option(option_id).is_none() {
            return false;
        }
        self.selected = Some(option_id.to_string());
        true
    }

    /// Record the pending selection and move forward
    ///
    /// On the last question this returns [`Step::Finished`] and stays put, so
    /// a failed submission can be retried by advancing again.
    pub fn advance(&mut self) -> Result<Step, DomainError> {
        let option_id = self.selected.as_deref().ok_or(DomainError::NoSelection)?;
        let question = self.current_question();
        let option = question.option(option_id).ok_or(DomainError::NoSelection)?;
        let answer = Answer::from_choice(question, option);

        if self.index < self.answers.len() {
            self.answers[self.index] = answer;
        } else {
            self.answers.push(answer);
        }

        if self.is_last() {
            return Ok(Step::Finished(self.answers.clone()));
        }

        self.index += 1;
        self.restore_selection();
        Ok(Step::Moved { index: self.index })
    }

    /// Move back one question, restoring its recorded choice
    pub fn retreat(&mut self) -> Result<usize, DomainError> {
        if self.index == 0 {
            return Err(DomainError::AtFirstQuestion);
        }
        self.index -= 1;
        self.restore_selection();
        Ok(self.index)
    }

    /// Capture the state for later resumption
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            index: self.index,
            answers: self.answers.clone(),
            selected_option: self.selected.clone(),
        }
    }

    fn restore_selection(&mut self) {
        let question = &self.bank.questions()[self.index];
        self.selected = self
            .answers
            .get(self.index)
            .and_then(|answer| question.option_by_text(&answer.chosen_text))
            .map(|option| option.id.clone());
    }
}
