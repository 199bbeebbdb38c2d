//! Profile store port

use super::store_error::StoreError;
use async_trait::async_trait;
use dpc_domain::Profile;

/// Remote storage for profile records
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Every profile whose slug matches exactly (case-sensitive)
    ///
    /// Returns all matches so the caller can enforce "exactly one".
    async fn profiles_by_slug(&self, slug: &str) -> Result<Vec<Profile>, StoreError>;

    /// Insert or overwrite a profile by slug
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StoreError>;

    /// Number of stored profiles
    async fn count_profiles(&self) -> Result<usize, StoreError>;
}
