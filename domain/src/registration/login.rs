//! Sign-in form for an existing account
//!
//! The password of every account is the digits of the WhatsApp number given
//! at registration, so signing in asks for the same two fields.

use super::validation::{EMAIL_RE, FieldError, RegistrationField};

/// Fewest WhatsApp digits accepted (two-digit area code plus a nine-digit mobile)
pub const MIN_WHATSAPP_DIGITS: usize = 11;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    /// Any formatting; only the digits are used
    pub whatsapp: String,
}

/// Validated e-mail and password pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, whatsapp: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            whatsapp: whatsapp.into(),
        }
    }

    pub fn whatsapp_digits(&self) -> String {
        self.whatsapp.chars().filter(char::is_ascii_digit).collect()
    }

    pub fn validate(&self) -> Result<Credentials, Vec<FieldError>> {
        let mut errors = Vec::new();
        let email = self.email.trim();
        let password = self.whatsapp_digits();

        if !EMAIL_RE.is_match(email) {
            errors.push(FieldError::new(RegistrationField::Email, "Email inválido"));
        }
        if password.len() < MIN_WHATSAPP_DIGITS {
            errors.push(FieldError::new(
                RegistrationField::Whatsapp,
                "WhatsApp deve ter pelo menos 11 dígitos",
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Credentials {
            email: email.to_string(),
            password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_number_becomes_password() {
        let credentials = LoginForm::new(" maria@example.com ", "(19) 98765-4321")
            .validate()
            .unwrap();
        assert_eq!(credentials.email, "maria@example.com");
        assert_eq!(credentials.password, "19987654321");
    }

    #[test]
    fn test_unmasked_number_accepted() {
        assert!(LoginForm::new("a@b.co", "19987654321").validate().is_ok());
    }

    #[test]
    fn test_counts_digits_not_characters() {
        // 15 characters but only 10 digits
        let errors = LoginForm::new("a@b.co", "(19) 8765-4321")
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, RegistrationField::Whatsapp);
    }

    #[test]
    fn test_reports_both_fields() {
        let errors = LoginForm::new("maria", "").validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![RegistrationField::Email, RegistrationField::Whatsapp]
        );
    }
}
