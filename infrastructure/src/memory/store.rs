//! In-memory implementation of every remote store port
//!
//! Behaves like the remote tables (upsert by id or slug, ordered listing,
//! case-sensitive slug match) but keeps nothing beyond the process.

use async_trait::async_trait;
use dpc_application::{
    OptionRecord, ProfileStore, QuestionRecord, QuestionStore, ResponseRecord, ResponseStore,
    StoreError,
};
use dpc_domain::Profile;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
pub struct InMemoryStore {
    questions: Mutex<BTreeMap<String, QuestionRecord>>,
    options: Mutex<BTreeMap<String, OptionRecord>>,
    profiles: Mutex<BTreeMap<String, Profile>>,
    responses: Mutex<Vec<ResponseRecord>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Unavailable("in-memory store poisoned".to_string()))
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given profiles
    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let store = Self::default();
        if let Ok(mut map) = store.profiles.lock() {
            map.extend(profiles.into_iter().map(|p| (p.slug.clone(), p)));
        }
        store
    }

    /// Responses inserted so far
    pub fn responses(&self) -> Vec<ResponseRecord> {
        self.responses
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl QuestionStore for InMemoryStore {
    async fn count_questions(&self) -> Result<usize, StoreError> {
        Ok(lock(&self.questions)?.len())
    }

    async fn count_options(&self) -> Result<usize, StoreError> {
        Ok(lock(&self.options)?.len())
    }

    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, StoreError> {
        Ok(lock(&self.questions)?.values().cloned().collect())
    }

    async fn list_options(&self) -> Result<Vec<OptionRecord>, StoreError> {
        Ok(lock(&self.options)?.values().cloned().collect())
    }

    async fn upsert_question(&self, record: &QuestionRecord) -> Result<(), StoreError> {
        lock(&self.questions)?.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn upsert_option(&self, record: &OptionRecord) -> Result<(), StoreError> {
        lock(&self.options)?.insert(record.id.clone(), record.clone());
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn profiles_by_slug(&self, slug: &str) -> Result<Vec<Profile>, StoreError> {
        Ok(lock(&self.profiles)?.get(slug).cloned().into_iter().collect())
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        lock(&self.profiles)?.insert(profile.slug.clone(), profile.clone());
        Ok(())
    }

    async fn count_profiles(&self) -> Result<usize, StoreError> {
        Ok(lock(&self.profiles)?.len())
    }
}

#[async_trait]
impl ResponseStore for InMemoryStore {
    async fn insert_responses(&self, records: &[ResponseRecord]) -> Result<(), StoreError> {
        lock(&self.responses)?.extend_from_slice(records);
        Ok(())
    }
}
