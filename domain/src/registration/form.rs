//! Registration form value objects

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Brazilian federative units accepted in the `state` field
pub const BRAZILIAN_STATES: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Masculino,
    Feminino,
    Outro,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Masculino => "masculino",
            Gender::Feminino => "feminino",
            Gender::Outro => "outro",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "masculino" | "m" => Ok(Gender::Masculino),
            "feminino" | "f" => Ok(Gender::Feminino),
            "outro" | "o" => Ok(Gender::Outro),
            other => Err(format!("unknown gender: {}", other)),
        }
    }
}

/// Raw registration input as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    /// Two-letter federative unit code
    pub state: String,
    pub city: String,
    pub congregation: String,
    pub email: String,
    /// Formatted as `(XX) XXXXX-XXXX`
    pub whatsapp: String,
    pub accepted_terms: bool,
}

/// Profile metadata sent along with the sign-up request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    pub first_name: String,
    pub last_name: String,
    pub whatsapp: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub congregation: Option<String>,
}

/// A registration that passed validation and is ready for sign-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub email: String,
    /// Derived from the WhatsApp digits
    pub password: String,
    pub metadata: UserMetadata,
}
