//! Serializable quiz session snapshot for session resumption

use super::answer::Answer;
use serde::{Deserialize, Serialize};

/// Persisted form of an in-progress [`QuizSession`](super::QuizSession)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current question index
    pub index: usize,
    /// Recorded answers, one per question from the start
    pub answers: Vec<Answer>,
    /// Pending option id for the current question
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<String>,
}

impl SessionSnapshot {
    /// A snapshot with nothing recorded yet
    pub fn is_fresh(&self) -> bool {
        self.index == 0 && self.answers.is_empty() && self.selected_option.is_none()
    }
}
