//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod quiz_controller;
pub mod reconcile_questions;
pub mod register_user;
pub mod resolve_questions;
pub mod seed_profiles;
pub mod sign_in;
pub mod submit_diagnostic;

#[cfg(test)]
pub(crate) mod test_support;
