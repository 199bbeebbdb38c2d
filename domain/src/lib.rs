//! Domain layer for dpc-diagnostic
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Question bank
//!
//! An ordered list of multiple-choice [`Question`]s. Each option votes for
//! zero or more profile tags.
//!
//! ## Quiz session
//!
//! [`QuizSession`] walks the bank one question at a time. Going back restores
//! the recorded choice instead of deleting it.
//!
//! ## Scoring
//!
//! [`ProfileScore`] tallies one vote per tag occurrence and picks the
//! strictly largest count, breaking ties in favour of the profile counted
//! first.

pub mod config;
pub mod core;
pub mod diagnostic;
pub mod profile;
pub mod question;
pub mod quiz;
pub mod registration;
pub mod scoring;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::error::DomainError;
pub use diagnostic::{DiagnosticResult, SubmissionOutcome, SubmissionWarning};
pub use profile::Profile;
pub use question::{Question, QuestionBank, QuestionOption};
pub use quiz::{Answer, QuizSession, SessionSnapshot, Step};
pub use registration::{
    BRAZILIAN_STATES, CityMatch, Credentials, FieldError, Gender, LoginForm, MIN_WHATSAPP_DIGITS,
    RegistrationField, RegistrationForm, UserMetadata, ValidRegistration, match_city,
    sort_city_names,
};
pub use scoring::{ProfileScore, Tally};
