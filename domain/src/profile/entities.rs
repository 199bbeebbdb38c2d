//! Profile entity

use serde::{Deserialize, Serialize};

/// A spiritual archetype that quiz answers accumulate evidence toward
///
/// Identified by its slug; every descriptive field is free text and may be
/// empty when the stored record leaves it unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub slug: String,
    /// Display name (e.g., "O Perfeccionista")
    pub name: String,
    pub description: String,
    pub predominant_emotion: String,
    /// How the profile influences decisions
    pub influence: String,
    /// How the profile affects the person's destiny
    pub destiny: String,
    pub spiritual_lesson: String,
    pub associated_spirit: String,
    /// How the associated spirit operates
    pub operation: String,
    pub stratagem: String,
    /// The refuge the person seeks
    pub refuge: String,
    pub biblical_character: String,
    /// How God exalted the biblical character
    pub exaltation: String,
    /// How the profile is usually formed
    pub formation: String,
    /// Common pains associated with the profile
    pub pains: Vec<String>,
}

impl Profile {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Pains joined for single-line display
    pub fn pains_summary(&self) -> String {
        self.pains.join(", ")
    }

    /// Labelled descriptive fields in display order, skipping empty ones
    pub fn described_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Emoção predominante", self.predominant_emotion.as_str()),
            ("Como influencia nas decisões", self.influence.as_str()),
            ("Como afeta o destino", self.destiny.as_str()),
            ("Lição espiritual", self.spiritual_lesson.as_str()),
            ("Demônio associado", self.associated_spirit.as_str()),
            ("Como ele opera", self.operation.as_str()),
            ("Artimanha utilizada", self.stratagem.as_str()),
            ("Refúgio que procura", self.refuge.as_str()),
            ("Personagem bíblico", self.biblical_character.as_str()),
            ("Como Deus exaltou", self.exaltation.as_str()),
            ("Formação do perfil", self.formation.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
    }
}
