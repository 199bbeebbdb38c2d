//! Brazilian locality lookups

pub mod ibge;

pub use ibge::IbgeCityDirectory;
