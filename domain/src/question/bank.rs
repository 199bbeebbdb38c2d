//! Validated, ordered question bank

use super::entities::Question;
use crate::core::error::DomainError;
use std::collections::HashSet;

/// The ordered list of questions served for one quiz session
///
/// Construction guarantees the bank is non-empty and question ids are unique.
/// Within each question both option ids and option texts are unique, since a
/// recorded answer is mapped back to its option by text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Result<Self, DomainError> {
        if questions.is_empty() {
            return Err(DomainError::EmptyQuestionBank);
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id.as_str()) {
                return Err(DomainError::DuplicateQuestion(question.id.clone()));
            }
            let mut option_ids = HashSet::new();
            let mut option_texts = HashSet::new();
            for option in &question.options {
                if !option_ids.insert(option.id.as_str()) {
                    return Err(DomainError::DuplicateOption {
                        question: question.id.clone(),
                        option: option.id.clone(),
                    });
                }
                if !option_texts.insert(option.text.as_str()) {
                    return Err(DomainError::DuplicateOptionText {
                        question: question.id.clone(),
                        text: option.text.clone(),
                    });
                }
            }
        }

        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed bank; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    /// Position of a question by id
    pub fn position(&self, question_id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == question_id)
    }

    /// Total number of options across all questions
    pub fn option_count(&self) -> usize {
        self.questions.iter().map(|q| q.options.len()).sum()
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}

impl<'a> IntoIterator for &'a QuestionBank {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
