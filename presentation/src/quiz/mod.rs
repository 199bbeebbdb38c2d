//! Interactive quiz

pub mod repl;

pub use repl::{QuizInput, QuizRepl, parse_input};
