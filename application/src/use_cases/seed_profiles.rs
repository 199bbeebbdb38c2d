//! Seed Profiles use case
//!
//! Upserts a fixed set of profiles by slug, one at a time.

use crate::ports::profile_store::ProfileStore;
use dpc_domain::Profile;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Outcome of a seeding run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
    /// Profiles in the store afterwards, when the count could be read
    pub stored: Option<usize>,
}

impl SeedReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

pub struct SeedProfilesUseCase<P: ProfileStore + 'static> {
    store: Arc<P>,
}

impl<P: ProfileStore + 'static> SeedProfilesUseCase<P> {
    pub fn new(store: Arc<P>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, profiles: &[Profile]) -> SeedReport {
        info!("Seeding {} profiles", profiles.len());
        let mut report = SeedReport {
            total: profiles.len(),
            ..SeedReport::default()
        };

        for profile in profiles {
            match self.store.upsert_profile(profile).await {
                Ok(()) => {
                    info!("Profile {} stored", profile.slug);
                    report.succeeded += 1;
                }
                Err(e) => {
                    error!("Failed to store profile {}: {}", profile.slug, e);
                    report.failed += 1;
                }
            }
        }

        match self.store.count_profiles().await {
            Ok(count) => report.stored = Some(count),
            Err(e) => warn!("Could not count stored profiles: {}", e),
        }

        info!(
            "Seeding finished: {} succeeded, {} failed",
            report.succeeded, report.failed
        );
        report
    }
}
