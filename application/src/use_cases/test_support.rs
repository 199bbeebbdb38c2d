//! In-memory port implementations shared by the use case tests

use crate::ports::auth::{AuthError, AuthPort, AuthSession, SignUpResponse};
use crate::ports::identity::UserId;
use crate::ports::key_value::{KeyValueError, KeyValueStore};
use crate::ports::profile_store::ProfileStore;
use crate::ports::question_store::{OptionRecord, QuestionRecord, QuestionStore};
use crate::ports::response_store::{ResponseRecord, ResponseStore};
use crate::ports::snapshot_source::{QuestionSnapshotSource, SnapshotError};
use crate::ports::store_error::StoreError;
use async_trait::async_trait;
use dpc_domain::{Profile, Question, QuestionOption, UserMetadata};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;

fn unavailable() -> StoreError {
    StoreError::Unavailable("simulated outage".into())
}

/// Three questions with two options each; option `a` votes for `ansioso`,
/// option `b` for `culpado`
pub fn sample_questions() -> Vec<Question> {
    (1..=3)
        .map(|i| {
            let id = format!("q{:02}", i);
            Question::new(id.clone(), format!("Pergunta {}", i))
                .with_option(QuestionOption::new(
                    format!("{}a", id),
                    format!("Resposta {}A", i),
                    vec!["ansioso".into()],
                ))
                .with_option(QuestionOption::new(
                    format!("{}b", id),
                    format!("Resposta {}B", i),
                    vec!["culpado".into()],
                ))
        })
        .collect()
}

// ==================== Question store ====================

#[derive(Default)]
pub struct MockQuestionStore {
    questions: Mutex<BTreeMap<String, String>>,
    options: Mutex<BTreeMap<String, OptionRecord>>,
    fail_reads: Mutex<bool>,
    fail_writes: Mutex<bool>,
    failing_questions: Mutex<HashSet<String>>,
    failing_options: Mutex<HashSet<String>>,
}

impl MockQuestionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self) {
        *self.fail_reads.lock().unwrap() = true;
    }

    pub fn fail_writes(&self) {
        *self.fail_writes.lock().unwrap() = true;
    }

    pub fn fail_question_writes_for(&self, id: &str) {
        self.failing_questions.lock().unwrap().insert(id.to_string());
    }

    pub fn fail_option_writes_for(&self, id: &str) {
        self.failing_options.lock().unwrap().insert(id.to_string());
    }

    pub fn question_count(&self) -> usize {
        self.questions.lock().unwrap().len()
    }

    pub fn option_count(&self) -> usize {
        self.options.lock().unwrap().len()
    }

    pub fn contents(&self) -> (BTreeMap<String, String>, BTreeMap<String, OptionRecord>) {
        (
            self.questions.lock().unwrap().clone(),
            self.options.lock().unwrap().clone(),
        )
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if *self.fail_reads.lock().unwrap() {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl QuestionStore for MockQuestionStore {
    async fn count_questions(&self) -> Result<usize, StoreError> {
        self.check_read()?;
        Ok(self.question_count())
    }

    async fn count_options(&self) -> Result<usize, StoreError> {
        self.check_read()?;
        Ok(self.option_count())
    }

    async fn list_questions(&self) -> Result<Vec<QuestionRecord>, StoreError> {
        self.check_read()?;
        Ok(self
            .questions
            .lock()
            .unwrap()
            .iter()
            .map(|(id, text)| QuestionRecord {
                id: id.clone(),
                text: text.clone(),
            })
            .collect())
    }

    async fn list_options(&self) -> Result<Vec<OptionRecord>, StoreError> {
        self.check_read()?;
        Ok(self.options.lock().unwrap().values().cloned().collect())
    }

    async fn upsert_question(&self, record: &QuestionRecord) -> Result<(), StoreError> {
        if *self.fail_writes.lock().unwrap()
            || self.failing_questions.lock().unwrap().contains(&record.id)
        {
            return Err(unavailable());
        }
        self.questions
            .lock()
            .unwrap()
            .insert(record.id.clone(), record.text.clone());
        Ok(())
    }

    async fn upsert_option(&self, record: &OptionRecord) -> Result<(), StoreError> {
        if *self.fail_writes.lock().unwrap()
            || self.failing_options.lock().unwrap().contains(&record.id)
        {
            return Err(unavailable());
        }
        self.options
            .lock()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        Ok(())
    }
}

// ==================== Snapshot ====================

pub struct StaticSnapshot {
    result: Result<Vec<Question>, SnapshotError>,
}

impl StaticSnapshot {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            result: Ok(questions),
        }
    }

    pub fn broken() -> Self {
        Self {
            result: Err(SnapshotError::Malformed("unexpected end of input".into())),
        }
    }
}

impl QuestionSnapshotSource for StaticSnapshot {
    fn load(&self) -> Result<Vec<Question>, SnapshotError> {
        self.result.clone()
    }
}

// ==================== Profiles ====================

#[derive(Default)]
pub struct MockProfileStore {
    profiles: Mutex<Vec<Profile>>,
    fail_all: Mutex<bool>,
    failing_upserts: Mutex<HashSet<String>>,
}

impl MockProfileStore {
    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: Mutex::new(profiles),
            ..Self::default()
        }
    }

    pub fn fail_all(&self) {
        *self.fail_all.lock().unwrap() = true;
    }

    pub fn fail_upsert_for(&self, slug: &str) {
        self.failing_upserts.lock().unwrap().insert(slug.to_string());
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.profiles.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileStore for MockProfileStore {
    async fn profiles_by_slug(&self, slug: &str) -> Result<Vec<Profile>, StoreError> {
        if *self.fail_all.lock().unwrap() {
            return Err(unavailable());
        }
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.slug == slug)
            .cloned()
            .collect())
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        if *self.fail_all.lock().unwrap()
            || self.failing_upserts.lock().unwrap().contains(&profile.slug)
        {
            return Err(unavailable());
        }
        let mut profiles = self.profiles.lock().unwrap();
        match profiles.iter_mut().find(|p| p.slug == profile.slug) {
            Some(existing) => *existing = profile.clone(),
            None => profiles.push(profile.clone()),
        }
        Ok(())
    }

    async fn count_profiles(&self) -> Result<usize, StoreError> {
        if *self.fail_all.lock().unwrap() {
            return Err(unavailable());
        }
        Ok(self.profiles.lock().unwrap().len())
    }
}

// ==================== Responses ====================

#[derive(Default)]
pub struct MockResponseStore {
    records: Mutex<Vec<ResponseRecord>>,
    fail: Mutex<bool>,
}

impl MockResponseStore {
    pub fn failing() -> Self {
        Self {
            fail: Mutex::new(true),
            ..Self::default()
        }
    }

    pub fn records(&self) -> Vec<ResponseRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn records_for(&self, user: &UserId) -> usize {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.user_id == user)
            .count()
    }
}

#[async_trait]
impl ResponseStore for MockResponseStore {
    async fn insert_responses(&self, records: &[ResponseRecord]) -> Result<(), StoreError> {
        if *self.fail.lock().unwrap() {
            return Err(StoreError::Rejected {
                status: 403,
                message: "row-level security".into(),
            });
        }
        self.records.lock().unwrap().extend_from_slice(records);
        Ok(())
    }
}

// ==================== Key-value ====================

#[derive(Default)]
pub struct MemoryKeyValue {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValue {
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryKeyValue {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueError> {
        self.put_raw(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

// ==================== Auth ====================

/// Canned sign-up and sign-in answers; every call is recorded
pub struct MockAuth {
    sign_up: Result<SignUpResponse, AuthError>,
    sign_in: Result<AuthSession, AuthError>,
    calls: Mutex<Vec<String>>,
}

impl MockAuth {
    pub fn new(
        sign_up: Result<SignUpResponse, AuthError>,
        sign_in: Result<AuthSession, AuthError>,
    ) -> Self {
        Self {
            sign_up,
            sign_in,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthPort for MockAuth {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        _metadata: &UserMetadata,
    ) -> Result<SignUpResponse, AuthError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("sign_up {} {}", email, password));
        self.sign_up.clone()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("sign_in {} {}", email, password));
        self.sign_in.clone()
    }
}

pub fn sample_session() -> AuthSession {
    AuthSession {
        user_id: UserId::new("u-1"),
        access_token: "token".into(),
        expires_at: None,
    }
}
