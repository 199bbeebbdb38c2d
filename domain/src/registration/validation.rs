//! Registration form validation
//!
//! All rule violations are collected so the caller can report every field at
//! once.

use super::form::{BRAZILIAN_STATES, RegistrationForm, UserMetadata, ValidRegistration};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

pub(super) static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static WHATSAPP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d{2}\) \d{5}-\d{4}$").expect("valid whatsapp regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationField {
    FirstName,
    LastName,
    BirthDate,
    State,
    City,
    Congregation,
    Email,
    Whatsapp,
    Terms,
}

impl RegistrationField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationField::FirstName => "first_name",
            RegistrationField::LastName => "last_name",
            RegistrationField::BirthDate => "birth_date",
            RegistrationField::State => "state",
            RegistrationField::City => "city",
            RegistrationField::Congregation => "congregation",
            RegistrationField::Email => "email",
            RegistrationField::Whatsapp => "whatsapp",
            RegistrationField::Terms => "terms",
        }
    }
}

/// A single validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: RegistrationField,
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(field: RegistrationField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.as_str(), self.message)
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl RegistrationForm {
    /// Digits of the WhatsApp number
    pub fn whatsapp_digits(&self) -> String {
        self.whatsapp.chars().filter(char::is_ascii_digit).collect()
    }

    /// Validate every field, using `today` to reject future birth dates
    pub fn validate(&self, today: NaiveDate) -> Result<ValidRegistration, Vec<FieldError>> {
        use RegistrationField as F;
        let mut errors = Vec::new();

        if self.first_name.trim().chars().count() < 2 {
            errors.push(FieldError::new(
                F::FirstName,
                "O nome deve ter pelo menos 2 caracteres.",
            ));
        }
        if self.last_name.trim().chars().count() < 2 {
            errors.push(FieldError::new(
                F::LastName,
                "O sobrenome deve ter pelo menos 2 caracteres.",
            ));
        }
        if let Some(date) = self.birth_date
            && date > today
        {
            errors.push(FieldError::new(
                F::BirthDate,
                "A data de nascimento não pode estar no futuro.",
            ));
        }
        if !BRAZILIAN_STATES.contains(&self.state.trim().to_uppercase().as_str()) {
            errors.push(FieldError::new(F::State, "Por favor, selecione um estado."));
        }
        if self.city.trim().is_empty() {
            errors.push(FieldError::new(F::City, "Por favor, selecione uma cidade."));
        }
        if self.congregation.trim().chars().count() < 2 {
            errors.push(FieldError::new(
                F::Congregation,
                "Por favor, informe sua congregação.",
            ));
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            errors.push(FieldError::new(
                F::Email,
                "Por favor, informe um e-mail válido.",
            ));
        }
        if !WHATSAPP_RE.is_match(self.whatsapp.trim()) {
            errors.push(FieldError::new(
                F::Whatsapp,
                "Formato inválido. Use (XX) XXXXX-XXXX.",
            ));
        }
        if !self.accepted_terms {
            errors.push(FieldError::new(
                F::Terms,
                "Você precisa aceitar os termos de uso.",
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidRegistration {
            email: self.email.trim().to_string(),
            password: self.whatsapp_digits(),
            metadata: UserMetadata {
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                whatsapp: self.whatsapp.trim().to_string(),
                birth_date: self.birth_date,
                gender: self.gender,
                state: non_empty(&self.state.to_uppercase()),
                city: non_empty(&self.city),
                congregation: non_empty(&self.congregation),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::form::Gender;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Maria".into(),
            last_name: "Souza".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 3, 14),
            gender: Some(Gender::Feminino),
            state: "sp".into(),
            city: "Campinas".into(),
            congregation: "Sede".into(),
            email: "maria@example.com".into(),
            whatsapp: "(19) 98765-4321".into(),
            accepted_terms: true,
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<RegistrationField> {
        errors.iter().map(|e| e.field).collect()
    }

    #[test]
    fn test_valid_form_derives_password_from_digits() {
        let valid = valid_form().validate(today()).unwrap();
        assert_eq!(valid.password, "19987654321");
        assert_eq!(valid.email, "maria@example.com");
        assert_eq!(valid.metadata.state.as_deref(), Some("SP"));
        assert_eq!(valid.metadata.gender, Some(Gender::Feminino));
    }

    #[test]
    fn test_collects_all_errors() {
        let form = RegistrationForm {
            first_name: "M".into(),
            email: "not-an-email".into(),
            accepted_terms: false,
            ..valid_form()
        };
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(
            fields(&errors),
            vec![
                RegistrationField::FirstName,
                RegistrationField::Email,
                RegistrationField::Terms
            ]
        );
    }

    #[test]
    fn test_whatsapp_format() {
        let form = RegistrationForm {
            whatsapp: "19987654321".into(),
            ..valid_form()
        };
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(fields(&errors), vec![RegistrationField::Whatsapp]);
    }

    #[test]
    fn test_unknown_state_rejected() {
        let form = RegistrationForm {
            state: "XX".into(),
            ..valid_form()
        };
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(fields(&errors), vec![RegistrationField::State]);
    }

    #[test]
    fn test_future_birth_date_rejected() {
        let form = RegistrationForm {
            birth_date: NaiveDate::from_ymd_opt(2030, 1, 1),
            ..valid_form()
        };
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(fields(&errors), vec![RegistrationField::BirthDate]);
    }

    #[test]
    fn test_gender_from_str() {
        assert_eq!("Feminino".parse::<Gender>().unwrap(), Gender::Feminino);
        assert_eq!("m".parse::<Gender>().unwrap(), Gender::Masculino);
        assert!("x".parse::<Gender>().is_err());
    }
}
