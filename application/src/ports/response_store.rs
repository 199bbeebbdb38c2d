//! Response store port (per-answer audit history)

use super::identity::UserId;
use super::store_error::StoreError;
use async_trait::async_trait;
use dpc_domain::Answer;

/// One persisted answer of a signed-in user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRecord {
    pub user_id: UserId,
    pub question_id: String,
    pub chosen_text: String,
    pub tags: Vec<String>,
}

impl ResponseRecord {
    pub fn from_answer(user_id: &UserId, answer: &Answer) -> Self {
        Self {
            user_id: user_id.clone(),
            question_id: answer.question_id.clone(),
            chosen_text: answer.chosen_text.clone(),
            tags: answer.tags.clone(),
        }
    }
}

/// Remote storage for submitted responses
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Insert all records in one batch
    async fn insert_responses(&self, records: &[ResponseRecord]) -> Result<(), StoreError>;
}
