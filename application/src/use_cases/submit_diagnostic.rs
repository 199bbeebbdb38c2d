//! Submit Diagnostic use case
//!
//! Scores a finished set of answers, resolves the winning profile and, for a
//! signed-in user, stores one response record per answer. The response write
//! is best-effort: its failure becomes a warning on the outcome.

use crate::ports::event_logger::{DiagnosticEvent, EventLogger, NoEventLogger};
use crate::ports::identity::CurrentUser;
use crate::ports::profile_store::ProfileStore;
use crate::ports::response_store::{ResponseRecord, ResponseStore};
use crate::ports::store_error::StoreError;
use dpc_domain::{
    Answer, DiagnosticResult, DomainError, Profile, ProfileScore, SubmissionOutcome,
    SubmissionWarning,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors that make a submission fail as a whole
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("{0}")]
    Scoring(#[from] DomainError),

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Profile slug {slug} matches {count} records")]
    AmbiguousProfile { slug: String, count: usize },

    #[error("Profile lookup failed: {0}")]
    Lookup(#[from] StoreError),
}

/// Use case for scoring and persisting a diagnostic
pub struct SubmitDiagnosticUseCase {
    profiles: Arc<dyn ProfileStore>,
    responses: Arc<dyn ResponseStore>,
    user: Arc<dyn CurrentUser>,
    logger: Arc<dyn EventLogger>,
}

impl SubmitDiagnosticUseCase {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        responses: Arc<dyn ResponseStore>,
        user: Arc<dyn CurrentUser>,
    ) -> Self {
        Self {
            profiles,
            responses,
            user,
            logger: Arc::new(NoEventLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn EventLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub async fn execute(&self, answers: &[Answer]) -> Result<SubmissionOutcome, SubmitError> {
        let score = ProfileScore::from_answers(answers)?;
        info!(
            "Dominant profile: {} ({} of {} votes)",
            score.winner,
            score.winning_score(),
            score.tally.total()
        );

        let profile = self.lookup_profile(&score.winner).await?;

        let mut warnings = Vec::new();
        if let Some(user_id) = self.user.current_user().await {
            let records: Vec<ResponseRecord> = answers
                .iter()
                .map(|a| ResponseRecord::from_answer(&user_id, a))
                .collect();
            match self.responses.insert_responses(&records).await {
                Ok(()) => info!("Saved {} responses for user {}", records.len(), user_id),
                Err(e) => {
                    error!("Error saving responses: {}", e);
                    warnings.push(SubmissionWarning::ResponsesNotSaved {
                        reason: e.to_string(),
                    });
                }
            }
        }

        let outcome = SubmissionOutcome {
            result: DiagnosticResult {
                winner: score.winner,
                tally: score.tally,
                profile,
            },
            warnings,
        };

        self.logger.log(DiagnosticEvent::new(
            "diagnostic_submitted",
            serde_json::json!({
                "winner": outcome.result.winner,
                "tally": outcome.result.tally,
                "answers": answers.len(),
                "warnings": outcome.warnings,
            }),
        ));
        Ok(outcome)
    }

    /// Exact slug lookup that must yield exactly one record
    async fn lookup_profile(&self, slug: &str) -> Result<Profile, SubmitError> {
        let mut matches = self.profiles.profiles_by_slug(slug).await?;
        match matches.len() {
            1 => Ok(matches.remove(0)),
            0 => {
                warn!("No profile record for slug {}", slug);
                Err(SubmitError::UnknownProfile(slug.to_string()))
            }
            count => Err(SubmitError::AmbiguousProfile {
                slug: slug.to_string(),
                count,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::identity::{AnonymousUser, FixedUser, UserId};
    use crate::use_cases::test_support::{MockProfileStore, MockResponseStore};

    fn answer(question: &str, tags: &[&str]) -> Answer {
        Answer::new(
            question,
            format!("resposta {}", question),
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    fn profiles() -> Vec<Profile> {
        vec![
            Profile::new("ansioso", "O Ansioso"),
            Profile::new("culpado", "O Culpado"),
        ]
    }

    fn use_case(
        profiles: Arc<MockProfileStore>,
        responses: Arc<MockResponseStore>,
        user: Arc<dyn CurrentUser>,
    ) -> SubmitDiagnosticUseCase {
        SubmitDiagnosticUseCase::new(profiles, responses, user)
    }

    #[tokio::test]
    async fn test_signed_in_submission_saves_responses() {
        let responses = Arc::new(MockResponseStore::default());
        let user = UserId::new("user-1");
        let uc = use_case(
            Arc::new(MockProfileStore::with_profiles(profiles())),
            Arc::clone(&responses),
            Arc::new(FixedUser(user.clone())),
        );

        let answers = vec![
            answer("q1", &["ansioso"]),
            answer("q2", &["culpado", "ansioso"]),
        ];
        let outcome = uc.execute(&answers).await.unwrap();

        assert!(outcome.is_clean());
        assert_eq!(outcome.result.winner, "ansioso");
        assert_eq!(outcome.result.profile.name, "O Ansioso");
        assert_eq!(outcome.result.tally.get("ansioso"), 2);
        assert_eq!(responses.records_for(&user), 2);
        assert_eq!(responses.records()[1].chosen_text, "resposta q2");
    }

    #[tokio::test]
    async fn test_anonymous_submission_writes_nothing() {
        let responses = Arc::new(MockResponseStore::default());
        let uc = use_case(
            Arc::new(MockProfileStore::with_profiles(profiles())),
            Arc::clone(&responses),
            Arc::new(AnonymousUser),
        );

        let outcome = uc.execute(&[answer("q1", &["culpado"])]).await.unwrap();
        assert_eq!(outcome.result.winner, "culpado");
        assert!(responses.records().is_empty());
    }

    #[tokio::test]
    async fn test_response_failure_is_a_warning() {
        let uc = use_case(
            Arc::new(MockProfileStore::with_profiles(profiles())),
            Arc::new(MockResponseStore::failing()),
            Arc::new(FixedUser(UserId::new("user-1"))),
        );

        let outcome = uc.execute(&[answer("q1", &["ansioso"])]).await.unwrap();
        assert_eq!(outcome.result.winner, "ansioso");
        assert_eq!(outcome.warnings.len(), 1);
        assert!(matches!(
            outcome.warnings[0],
            SubmissionWarning::ResponsesNotSaved { .. }
        ));
    }

    #[tokio::test]
    async fn test_empty_tally_is_error_and_writes_nothing() {
        let responses = Arc::new(MockResponseStore::default());
        let uc = use_case(
            Arc::new(MockProfileStore::with_profiles(profiles())),
            Arc::clone(&responses),
            Arc::new(FixedUser(UserId::new("user-1"))),
        );

        let result = uc.execute(&[answer("q1", &[]), answer("q2", &[])]).await;
        assert!(matches!(
            result,
            Err(SubmitError::Scoring(DomainError::NoDeterminableProfile))
        ));
        assert!(responses.records().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_profile_propagates() {
        let responses = Arc::new(MockResponseStore::default());
        let uc = use_case(
            Arc::new(MockProfileStore::with_profiles(profiles())),
            Arc::clone(&responses),
            Arc::new(FixedUser(UserId::new("user-1"))),
        );

        let result = uc.execute(&[answer("q1", &["vitimista"])]).await;
        assert!(matches!(result, Err(SubmitError::UnknownProfile(s)) if s == "vitimista"));
        assert!(responses.records().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_is_case_sensitive() {
        let uc = use_case(
            Arc::new(MockProfileStore::with_profiles(profiles())),
            Arc::new(MockResponseStore::default()),
            Arc::new(AnonymousUser),
        );
        let result = uc.execute(&[answer("q1", &["Ansioso"])]).await;
        assert!(matches!(result, Err(SubmitError::UnknownProfile(_))));
    }

    #[tokio::test]
    async fn test_ambiguous_profile_is_error() {
        let mut duplicated = profiles();
        duplicated.push(Profile::new("ansioso", "Outro Ansioso"));
        let uc = use_case(
            Arc::new(MockProfileStore::with_profiles(duplicated)),
            Arc::new(MockResponseStore::default()),
            Arc::new(AnonymousUser),
        );

        let result = uc.execute(&[answer("q1", &["ansioso"])]).await;
        assert!(matches!(
            result,
            Err(SubmitError::AmbiguousProfile { count: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates() {
        let store = Arc::new(MockProfileStore::with_profiles(profiles()));
        store.fail_all();
        let uc = use_case(store, Arc::new(MockResponseStore::default()), Arc::new(AnonymousUser));

        let result = uc.execute(&[answer("q1", &["ansioso"])]).await;
        assert!(matches!(result, Err(SubmitError::Lookup(_))));
    }
}
