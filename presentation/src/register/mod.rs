//! Account registration and sign-in prompts

pub mod prompt;

pub use prompt::{
    RegistrationPrompt, city_suggestions, format_whatsapp, parse_birth_date, parse_yes,
};
