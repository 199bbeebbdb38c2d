//! Question domain
//!
//! Questions and their options are loaded once per quiz session and are
//! read-only afterwards.

pub mod bank;
pub mod entities;

pub use bank::QuestionBank;
pub use entities::{Question, QuestionOption};
