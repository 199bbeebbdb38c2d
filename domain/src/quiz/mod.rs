//! Quiz session: answers, navigation and resumption snapshots

pub mod answer;
pub mod session;
pub mod snapshot;

pub use answer::Answer;
pub use session::{QuizSession, Step};
pub use snapshot::SessionSnapshot;
