//! Answer value object

use crate::question::{Question, QuestionOption};
use serde::{Deserialize, Serialize};

/// A user's pick of one option for one question
///
/// Stores the chosen option's display text rather than its id, plus a copy of
/// the option's profile tags at answer time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    /// Display text of the chosen option
    pub chosen_text: String,
    /// Profile tags copied from the chosen option
    pub tags: Vec<String>,
}

impl Answer {
    pub fn new(
        question_id: impl Into<String>,
        chosen_text: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            chosen_text: chosen_text.into(),
            tags,
        }
    }

    /// Record the choice of `option` for `question`
    pub fn from_choice(question: &Question, option: &QuestionOption) -> Self {
        Self::new(question.id.clone(), option.text.clone(), option.tags.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_choice_copies_text_and_tags() {
        let option = QuestionOption::new("q1b", "Me preocupo", vec!["ansioso".into()]);
        let question = Question::new("q1", "Pergunta").with_option(option.clone());

        let answer = Answer::from_choice(&question, &option);
        assert_eq!(answer.question_id, "q1");
        assert_eq!(answer.chosen_text, "Me preocupo");
        assert_eq!(answer.tags, vec!["ansioso".to_string()]);
    }
}
