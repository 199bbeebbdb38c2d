//! Infrastructure layer for dpc-diagnostic
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod bundled;
pub mod config;
pub mod location;
pub mod logging;
pub mod memory;
pub mod storage;
pub mod supabase;

// Re-export commonly used types
pub use bundled::{BundledSnapshot, bundled_profiles};
pub use config::{
    ConfigLoader, FileBackendConfig, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileQuizConfig, FileSessionConfig,
};
pub use location::IbgeCityDirectory;
pub use logging::JsonlEventLogger;
pub use memory::InMemoryStore;
pub use storage::{FileKeyValueStore, SESSION_CACHE_KEY, SessionCache};
pub use supabase::{SupabaseClient, SupabaseError};
