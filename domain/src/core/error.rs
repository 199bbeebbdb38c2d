//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No determinable profile: no answer contributed a profile tag")]
    NoDeterminableProfile,

    #[error("Question bank is empty")]
    EmptyQuestionBank,

    #[error("Duplicate question id: {0}")]
    DuplicateQuestion(String),

    #[error("Duplicate option id {option} in question {question}")]
    DuplicateOption { question: String, option: String },

    #[error("Duplicate option text {text:?} in question {question}")]
    DuplicateOptionText { question: String, text: String },

    #[error("No option selected for the current question")]
    NoSelection,

    #[error("Already at the first question")]
    AtFirstQuestion,

    #[error("Session snapshot does not match the question bank: {0}")]
    SnapshotMismatch(String),
}

impl DomainError {
    /// Whether the error is caused by the user's navigation rather than bad data
    pub fn is_navigation(&self) -> bool {
        matches!(self, DomainError::NoSelection | DomainError::AtFirstQuestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_profile_display() {
        let error = DomainError::NoDeterminableProfile;
        assert!(error.to_string().starts_with("No determinable profile"));
    }

    #[test]
    fn test_is_navigation() {
        assert!(DomainError::NoSelection.is_navigation());
        assert!(DomainError::AtFirstQuestion.is_navigation());
        assert!(!DomainError::EmptyQuestionBank.is_navigation());
        assert!(!DomainError::NoDeterminableProfile.is_navigation());
    }
}
