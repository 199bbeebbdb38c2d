//! Profile scoring
//!
//! Each answer adds one vote to every profile tag it carries (an answer with
//! `k` tags contributes to `k` counters). The profile with the strictly
//! largest count wins; ties go to the profile that was counted first.

pub mod score;
pub mod tally;

pub use score::ProfileScore;
pub use tally::Tally;
