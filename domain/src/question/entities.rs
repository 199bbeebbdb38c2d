//! Question and option entities

use serde::{Deserialize, Serialize};

/// One selectable option of a [`Question`]
///
/// Each option votes for zero or more profile tags; picking it adds one vote
/// to each of them when the diagnostic is scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Identifier, unique within its question
    pub id: String,
    /// Display text
    pub text: String,
    /// Profile slugs this option votes for
    #[serde(default)]
    pub tags: Vec<String>,
}

impl QuestionOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            tags,
        }
    }

    /// Check whether this option votes for the given profile slug
    pub fn votes_for(&self, slug: &str) -> bool {
        self.tags.iter().any(|t| t == slug)
    }
}

/// A multiple-choice question (Entity)
///
/// Immutable once loaded for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// Prompt text
    pub text: String,
    /// Ordered options
    pub options: Vec<QuestionOption>,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            options: Vec::new(),
        }
    }

    /// Builder-style helper to append an option
    pub fn with_option(mut self, option: QuestionOption) -> Self {
        self.options.push(option);
        self
    }

    /// Find an option by id
    pub fn option(&self, option_id: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.id == option_id)
    }

    /// Find an option by its display text
    pub fn option_by_text(&self, text: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.text == text)
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Every profile tag any option of this question can vote for
    pub fn available_tags(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .flat_map(|o| o.tags.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question::new("q01", "Como você reage a um erro?")
            .with_option(QuestionOption::new(
                "q01a",
                "Refaço tudo",
                vec!["perfeccionista".into()],
            ))
            .with_option(QuestionOption::new(
                "q01b",
                "Me culpo",
                vec!["culpado".into(), "vitimista".into()],
            ))
    }

    #[test]
    fn test_option_lookup() {
        let q = sample();
        assert_eq!(q.option("q01b").unwrap().text, "Me culpo");
        assert!(q.option("q02a").is_none());
    }

    #[test]
    fn test_option_by_text() {
        let q = sample();
        assert_eq!(q.option_by_text("Refaço tudo").unwrap().id, "q01a");
        assert!(q.option_by_text("refaço tudo").is_none());
    }

    #[test]
    fn test_available_tags() {
        let question = sample();
        let tags: Vec<_> = question.available_tags().collect();
        assert_eq!(tags, vec!["perfeccionista", "culpado", "vitimista"]);
    }

    #[test]
    fn test_votes_for() {
        let q = sample();
        assert!(q.options[1].votes_for("vitimista"));
        assert!(!q.options[0].votes_for("culpado"));
    }

    #[test]
    fn test_tags_default_when_missing() {
        let option: QuestionOption =
            serde_json::from_str(r#"{"id":"x","text":"y"}"#).unwrap();
        assert!(option.tags.is_empty());
    }
}
