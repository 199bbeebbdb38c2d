//! Presentation layer for dpc-diagnostic
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, the interactive quiz and the registration prompt.

pub mod cli;
pub mod output;
pub mod progress;
pub mod quiz;
pub mod register;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{SimpleSyncProgress, SyncProgressReporter};
pub use quiz::{QuizInput, QuizRepl};
pub use register::RegistrationPrompt;
