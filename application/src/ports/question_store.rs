//! Question store port
//!
//! Questions and options live in two related tables; options reference their
//! parent question by id.

use super::store_error::StoreError;
use async_trait::async_trait;
use dpc_domain::{Question, QuestionOption};

/// A row of the questions table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    pub id: String,
    pub text: String,
}

/// A row of the options table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRecord {
    pub id: String,
    /// Parent question id
    pub question_id: String,
    pub text: String,
    pub tags: Vec<String>,
}

impl QuestionRecord {
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            text: question.text.clone(),
        }
    }
}

impl OptionRecord {
    pub fn from_option(question_id: &str, option: &QuestionOption) -> Self {
        Self {
            id: option.id.clone(),
            question_id: question_id.to_string(),
            text: option.text.clone(),
            tags: option.tags.clone(),
        }
    }

    pub fn into_option(self) -> QuestionOption {
        QuestionOption::new(self.id, self.text, self.tags)
    }
}

/// Remote storage for questions and their options
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Number of rows in the questions table
    async fn count_questions(&self) -> Result<usize, StoreError>;

    /// Number of rows in the options table
    async fn count_options(&self) -> Result<usize, StoreError>;

    /// All questions, ordered by id
    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, StoreError>;

    /// All options, ordered by id
    async fn list_options(&self) -> Result<Vec<OptionRecord>, StoreError>;

    /// Insert or overwrite a question by id
    async fn upsert_question(&self, record: &QuestionRecord) -> Result<(), StoreError>;

    /// Insert or overwrite an option by id
    async fn upsert_option(&self, record: &OptionRecord) -> Result<(), StoreError>;
}
