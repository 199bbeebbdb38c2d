//! City directory port (municipalities of a Brazilian state)

use async_trait::async_trait;

/// Lookup of the municipalities of a federative unit
///
/// A failed lookup yields an empty list; callers then accept any city name.
#[async_trait]
pub trait CityDirectory: Send + Sync {
    /// Municipality names of `state` (a two-letter UF), sorted
    async fn cities(&self, state: &str) -> Vec<String>;
}

/// Directory that knows no cities, for offline runs
pub struct NoCityDirectory;

#[async_trait]
impl CityDirectory for NoCityDirectory {
    async fn cities(&self, _state: &str) -> Vec<String> {
        Vec::new()
    }
}
