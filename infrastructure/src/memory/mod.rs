//! In-process store used for `--offline` runs

mod store;

pub use store::InMemoryStore;
