//! User registration and sign-in: form input and validation rules

pub mod city;
pub mod form;
pub mod login;
pub mod validation;

pub use city::{CityMatch, collation_key, match_city, sort_city_names};
pub use form::{BRAZILIAN_STATES, Gender, RegistrationForm, UserMetadata, ValidRegistration};
pub use login::{Credentials, LoginForm, MIN_WHATSAPP_DIGITS};
pub use validation::{FieldError, RegistrationField};
