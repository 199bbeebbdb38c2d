//! Register User use case
//!
//! Validates the registration form, signs the user up with the WhatsApp
//! digits as password, and signs in when the backend did not.

use crate::ports::auth::{AuthError, AuthPort, AuthSession};
use crate::ports::identity::UserId;
use chrono::NaiveDate;
use dpc_domain::{FieldError, RegistrationForm};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum RegisterError {
    #[error("Invalid registration: {}", format_field_errors(.0))]
    Invalid(Vec<FieldError>),

    #[error("E-mail already registered with a different password")]
    EmailAlreadyRegistered,

    #[error("Sign-up did not create a user")]
    NoUserCreated,

    #[error(transparent)]
    Auth(#[from] AuthError),
}

pub(crate) fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// How a successful registration ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    SignedIn(AuthSession),
    /// The account exists but could not be signed in yet (e.g. e-mail
    /// confirmation pending)
    RegisteredPendingLogin(UserId),
}

pub struct RegisterUserUseCase<A: AuthPort + 'static> {
    auth: Arc<A>,
}

impl<A: AuthPort + 'static> RegisterUserUseCase<A> {
    pub fn new(auth: Arc<A>) -> Self {
        Self { auth }
    }

    pub async fn execute(
        &self,
        form: &RegistrationForm,
        today: NaiveDate,
    ) -> Result<RegisterOutcome, RegisterError> {
        let registration = form.validate(today).map_err(RegisterError::Invalid)?;
        let email = registration.email.as_str();
        let password = registration.password.as_str();

        let response = match self
            .auth
            .sign_up(email, password, &registration.metadata)
            .await
        {
            Ok(response) => response,
            Err(AuthError::AlreadyRegistered) => {
                info!("{} is already registered, trying to sign in", email);
                return match self.auth.sign_in(email, password).await {
                    Ok(session) => Ok(RegisterOutcome::SignedIn(session)),
                    Err(e) => {
                        warn!("Sign-in for existing account failed: {}", e);
                        Err(RegisterError::EmailAlreadyRegistered)
                    }
                };
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(session) = response.session {
            info!("User {} registered and signed in", session.user_id);
            return Ok(RegisterOutcome::SignedIn(session));
        }

        let user_id = response.user_id.ok_or(RegisterError::NoUserCreated)?;
        match self.auth.sign_in(email, password).await {
            Ok(session) => Ok(RegisterOutcome::SignedIn(session)),
            Err(e) => {
                warn!("User {} registered but sign-in failed: {}", user_id, e);
                Ok(RegisterOutcome::RegisteredPendingLogin(user_id))
            }
        }
    }
}
