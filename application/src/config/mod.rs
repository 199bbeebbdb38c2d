//! Application-level configuration.
//!
//! - [`SyncPolicy`] - how question resolution and reconciliation behave

pub mod sync_policy;

pub use sync_policy::{DEFAULT_EXPECTED_QUESTIONS, SyncPolicy};
