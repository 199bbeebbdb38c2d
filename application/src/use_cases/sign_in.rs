//! Sign In use case
//!
//! Signs an existing account in with its e-mail and the WhatsApp digits it
//! registered with.

use super::register_user::format_field_errors;
use crate::ports::auth::{AuthError, AuthPort, AuthSession};
use dpc_domain::{FieldError, LoginForm};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum SignInError {
    #[error("Invalid sign-in: {}", format_field_errors(.0))]
    Invalid(Vec<FieldError>),

    /// The account exists but its confirmation link was never followed
    #[error("E-mail not confirmed yet")]
    EmailNotConfirmed,

    #[error("Wrong e-mail or WhatsApp number")]
    InvalidCredentials,

    #[error(transparent)]
    Auth(AuthError),
}

impl From<AuthError> for SignInError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailNotConfirmed => SignInError::EmailNotConfirmed,
            AuthError::InvalidCredentials => SignInError::InvalidCredentials,
            other => SignInError::Auth(other),
        }
    }
}

pub struct SignInUseCase<A: AuthPort + 'static> {
    auth: Arc<A>,
}

impl<A: AuthPort + 'static> SignInUseCase<A> {
    pub fn new(auth: Arc<A>) -> Self {
        Self { auth }
    }

    pub async fn execute(&self, form: &LoginForm) -> Result<AuthSession, SignInError> {
        let credentials = form.validate().map_err(SignInError::Invalid)?;

        match self
            .auth
            .sign_in(&credentials.email, &credentials.password)
            .await
        {
            Ok(session) => {
                info!("User {} signed in", session.user_id);
                Ok(session)
            }
            Err(e) => {
                warn!("Sign-in for {} failed: {}", credentials.email, e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MockAuth, sample_session};
    use dpc_domain::RegistrationField;

    fn auth(sign_in: Result<AuthSession, AuthError>) -> Arc<MockAuth> {
        Arc::new(MockAuth::new(
            Err(AuthError::Unavailable("sign-up is not used".into())),
            sign_in,
        ))
    }

    #[tokio::test]
    async fn test_signs_in_with_whatsapp_digits() {
        let auth = auth(Ok(sample_session()));
        let session = SignInUseCase::new(Arc::clone(&auth))
            .execute(&LoginForm::new("maria@example.com", "(19) 98765-4321"))
            .await
            .unwrap();

        assert_eq!(session, sample_session());
        assert_eq!(auth.calls(), vec!["sign_in maria@example.com 19987654321"]);
    }

    #[tokio::test]
    async fn test_unconfirmed_email_reported_separately() {
        let result = SignInUseCase::new(auth(Err(AuthError::EmailNotConfirmed)))
            .execute(&LoginForm::new("maria@example.com", "19987654321"))
            .await;
        assert!(matches!(result, Err(SignInError::EmailNotConfirmed)));
    }

    #[tokio::test]
    async fn test_wrong_credentials() {
        let result = SignInUseCase::new(auth(Err(AuthError::InvalidCredentials)))
            .execute(&LoginForm::new("maria@example.com", "19987654321"))
            .await;
        assert!(matches!(result, Err(SignInError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_short_number_never_reaches_backend() {
        let auth = auth(Ok(sample_session()));
        let result = SignInUseCase::new(Arc::clone(&auth))
            .execute(&LoginForm::new("maria@example.com", "98765-4321"))
            .await;

        match result {
            Err(SignInError::Invalid(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, RegistrationField::Whatsapp);
            }
            other => panic!("expected validation errors, got {:?}", other),
        }
        assert!(auth.calls().is_empty());
    }

    #[tokio::test]
    async fn test_backend_outage_propagates() {
        let result = SignInUseCase::new(auth(Err(AuthError::Unavailable("timeout".into()))))
            .execute(&LoginForm::new("maria@example.com", "19987654321"))
            .await;
        assert!(matches!(
            result,
            Err(SignInError::Auth(AuthError::Unavailable(_)))
        ));
    }
}
