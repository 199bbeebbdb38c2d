//! Data shipped inside the binary
//!
//! - [`BundledSnapshot`]: the 33-question snapshot (`perguntas_dpc_33.json`)
//! - [`bundled_profiles`]: the five sample profiles used for seeding

mod profiles;
mod snapshot;

pub use profiles::bundled_profiles;
pub use snapshot::BundledSnapshot;
