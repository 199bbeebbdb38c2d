//! Profile domain

pub mod entities;

pub use entities::Profile;
