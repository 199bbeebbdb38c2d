//! Application layer for dpc-diagnostic
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_EXPECTED_QUESTIONS, SyncPolicy};
pub use ports::{
    auth::{AuthError, AuthPort, AuthSession, SignUpResponse},
    city_directory::{CityDirectory, NoCityDirectory},
    event_logger::{DiagnosticEvent, EventLogger, NoEventLogger},
    identity::{AnonymousUser, CurrentUser, FixedUser, UserId},
    key_value::{KeyValueError, KeyValueStore, NoStorage},
    profile_store::ProfileStore,
    progress::{NoSyncProgress, SyncProgressNotifier},
    question_store::{OptionRecord, QuestionRecord, QuestionStore},
    response_store::{ResponseRecord, ResponseStore},
    snapshot_source::{QuestionSnapshotSource, SnapshotError},
    store_error::StoreError,
};
pub use use_cases::quiz_controller::{QuizController, QuizError, QuizEvent, SESSION_KEY};
pub use use_cases::reconcile_questions::{
    ReconcileError, ReconcileQuestionsUseCase, ReconcileReport, RecordKind, SyncFailure,
};
pub use use_cases::register_user::{RegisterError, RegisterOutcome, RegisterUserUseCase};
pub use use_cases::resolve_questions::{
    QuestionSource, ResolveError, ResolveQuestionsUseCase, ResolvedQuestions,
};
pub use use_cases::seed_profiles::{SeedProfilesUseCase, SeedReport};
pub use use_cases::sign_in::{SignInError, SignInUseCase};
pub use use_cases::submit_diagnostic::{SubmitDiagnosticUseCase, SubmitError};
