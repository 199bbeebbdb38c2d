//! Local persistence adapters
//!
//! - [`FileKeyValueStore`]: one file per key under a directory
//! - [`SessionCache`]: the signed-in session kept between runs

mod file_store;
mod session_cache;

pub use file_store::FileKeyValueStore;
pub use session_cache::{SESSION_CACHE_KEY, SessionCache};
