//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod auth;
pub mod city_directory;
pub mod event_logger;
pub mod identity;
pub mod key_value;
pub mod profile_store;
pub mod progress;
pub mod question_store;
pub mod response_store;
pub mod snapshot_source;
pub mod store_error;
