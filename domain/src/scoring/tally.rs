//! Per-profile vote tally
//!
//! The tally keeps slugs in the order they were first counted. That order is
//! the tie-break used by [`Tally::leader`]: among equal maxima the slug that
//! received its first vote earliest wins.

use crate::quiz::answer::Answer;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Insertion-ordered map of profile slug to vote count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    entries: Vec<(String, u32)>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one vote per tag occurrence across all answers, in answer order
    ///
    /// # Example
    ///
    /// ```
    /// use dpc_domain::{Answer, Tally};
    ///
    /// let answers = vec![
    ///     Answer::new("q1", "A", vec!["a".into()]),
    ///     Answer::new("q2", "B", vec!["a".into(), "b".into()]),
    /// ];
    /// let tally = Tally::from_answers(&answers);
    /// assert_eq!(tally.get("a"), 2);
    /// assert_eq!(tally.get("b"), 1);
    /// ```
    pub fn from_answers(answers: &[Answer]) -> Self {
        let mut tally = Self::new();
        for answer in answers {
            for tag in &answer.tags {
                tally.add(tag);
            }
        }
        tally
    }

    /// Add one vote for `slug`, appending it if unseen
    pub fn add(&mut self, slug: &str) {
        self.add_votes(slug, 1);
    }

    fn add_votes(&mut self, slug: &str, votes: u32) {
        match self.entries.iter_mut().find(|(s, _)| s == slug) {
            Some((_, count)) => *count = count.saturating_add(votes),
            None => self.entries.push((slug.to_string(), votes)),
        }
    }

    /// Vote count for `slug` (0 if never counted)
    pub fn get(&self, slug: &str) -> u32 {
        self.entries
            .iter()
            .find(|(s, _)| s == slug)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.entries.iter().any(|(s, _)| s == slug)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-counted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(s, c)| (s.as_str(), *c))
    }

    /// Sum of all votes
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Highest vote count, if any
    pub fn max_score(&self) -> Option<u32> {
        self.entries.iter().map(|(_, c)| *c).max()
    }

    /// Slug with the strictly largest count; first-counted wins ties
    pub fn leader(&self) -> Option<(&str, u32)> {
        let mut best: Option<(&str, u32)> = None;
        for (slug, count) in self.iter() {
            match best {
                Some((_, top)) if count <= top => {}
                _ => best = Some((slug, count)),
            }
        }
        best
    }

    /// Entries sorted by descending count, ties kept in first-counted order
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut ranked: Vec<_> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (slug, count) in &self.entries {
            map.serialize_entry(slug, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Tally {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TallyVisitor;

        impl<'de> Visitor<'de> for TallyVisitor {
            type Value = Tally;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of profile slug to vote count")
            }

            // Repeated slugs are summed into their first position
            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Tally, A::Error> {
                let mut tally = Tally {
                    entries: Vec::with_capacity(access.size_hint().unwrap_or(0)),
                };
                while let Some((slug, count)) = access.next_entry::<String, u32>()? {
                    tally.add_votes(&slug, count);
                }
                Ok(tally)
            }
        }

        deserializer.deserialize_map(TallyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(tags: &[&str]) -> Answer {
        Answer::new("q", "t", tags.iter().map(|t| t.to_string()).collect())
    }

    #[test]
    fn test_counts_every_occurrence() {
        let answers = vec![answer(&["a"]), answer(&["a", "b"]), answer(&["b"])];
        let tally = Tally::from_answers(&answers);
        assert_eq!(tally.get("a"), 2);
        assert_eq!(tally.get("b"), 2);
        assert_eq!(tally.get("c"), 0);
    }

    #[test]
    fn test_total_equals_tag_count() {
        let answers = vec![
            answer(&["a", "b", "c"]),
            answer(&[]),
            answer(&["c"]),
            answer(&["a", "a"]),
        ];
        let tag_count: usize = answers.iter().map(|a| a.tags.len()).sum();
        assert_eq!(Tally::from_answers(&answers).total() as usize, tag_count);
    }

    #[test]
    fn test_leader_first_counted_wins_tie() {
        let tally = Tally::from_answers(&[answer(&["a"]), answer(&["a", "b"]), answer(&["b"])]);
        assert_eq!(tally.leader(), Some(("a", 2)));

        let reversed = Tally::from_answers(&[answer(&["b"]), answer(&["a", "b"]), answer(&["a"])]);
        assert_eq!(reversed.leader(), Some(("b", 2)));
    }

    #[test]
    fn test_leader_strict_maximum() {
        let tally = Tally::from_answers(&[answer(&["a"]), answer(&["b"]), answer(&["b"])]);
        assert_eq!(tally.leader(), Some(("b", 2)));
    }

    #[test]
    fn test_empty_tally_has_no_leader() {
        let tally = Tally::from_answers(&[answer(&[]), answer(&[])]);
        assert!(tally.is_empty());
        assert_eq!(tally.leader(), None);
        assert_eq!(tally.max_score(), None);
    }

    #[test]
    fn test_ranked_is_stable() {
        let tally = Tally::from_answers(&[
            answer(&["x"]),
            answer(&["y", "z"]),
            answer(&["z"]),
        ]);
        assert_eq!(tally.ranked(), vec![("z", 2), ("x", 1), ("y", 1)]);
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let tally = Tally::from_answers(&[answer(&["zeta", "alpha"]), answer(&["alpha"])]);
        let json = serde_json::to_string(&tally).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":2}"#);

        let back: Tally = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tally);
    }

    #[test]
    fn test_deserialize_merges_repeated_slugs() {
        let tally: Tally = serde_json::from_str(r#"{"a":1,"b":4,"a":2}"#).unwrap();
        assert_eq!(tally.len(), 2);
        assert_eq!(tally.get("a"), 3);
        assert_eq!(tally.iter().collect::<Vec<_>>(), vec![("a", 3), ("b", 4)]);
        assert_eq!(tally.total(), 7);
    }
}
