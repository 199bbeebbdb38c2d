//! Profile scoring

use super::tally::Tally;
use crate::core::error::DomainError;
use crate::quiz::answer::Answer;
use serde::{Deserialize, Serialize};

/// Outcome of scoring a finished set of answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileScore {
    /// Winning profile slug
    pub winner: String,
    /// Full per-slug tally
    pub tally: Tally,
}

impl ProfileScore {
    /// Tally the answers and pick the dominant profile
    ///
    /// Fails with [`DomainError::NoDeterminableProfile`] when no answer
    /// contributed a tag.
    pub fn from_answers(answers: &[Answer]) -> Result<Self, DomainError> {
        let tally = Tally::from_answers(answers);
        let winner = tally
            .leader()
            .map(|(slug, _)| slug.to_string())
            .ok_or(DomainError::NoDeterminableProfile)?;
        Ok(Self { winner, tally })
    }

    /// Votes received by the winner
    pub fn winning_score(&self) -> u32 {
        self.tally.get(&self.winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(tags: &[&str]) -> Answer {
        Answer::new("q", "t", tags.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_winner_is_max_key_in_tally() {
        let answers = vec![
            answer(&["ansioso"]),
            answer(&["controlador", "ansioso"]),
            answer(&["culpado"]),
            answer(&["ansioso"]),
        ];
        let score = ProfileScore::from_answers(&answers).unwrap();
        assert_eq!(score.winner, "ansioso");
        assert!(score.tally.contains(&score.winner));
        assert_eq!(Some(score.winning_score()), score.tally.max_score());
        assert_eq!(score.winning_score(), 3);
    }

    #[test]
    fn test_tie_goes_to_first_counted() {
        let answers = vec![answer(&["a"]), answer(&["a", "b"]), answer(&["b"])];
        let score = ProfileScore::from_answers(&answers).unwrap();
        assert_eq!(score.tally.get("a"), 2);
        assert_eq!(score.tally.get("b"), 2);
        assert_eq!(score.winner, "a");
    }

    #[test]
    fn test_all_empty_tags_is_indeterminate() {
        let answers = vec![answer(&[]), answer(&[]), answer(&[])];
        assert_eq!(
            ProfileScore::from_answers(&answers).unwrap_err(),
            DomainError::NoDeterminableProfile
        );
    }

    #[test]
    fn test_no_answers_is_indeterminate() {
        assert_eq!(
            ProfileScore::from_answers(&[]).unwrap_err(),
            DomainError::NoDeterminableProfile
        );
    }
}
