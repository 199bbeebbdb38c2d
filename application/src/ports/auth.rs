//! Authentication port (sign-up and password sign-in)

use super::identity::UserId;
use async_trait::async_trait;
use dpc_domain::UserMetadata;
use thiserror::Error;

/// Errors reported by the authentication backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User already registered")]
    AlreadyRegistered,

    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("Email not confirmed")]
    EmailNotConfirmed,

    #[error("Authentication rejected: {0}")]
    Rejected(String),

    #[error("Authentication service unavailable: {0}")]
    Unavailable(String),
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: UserId,
    pub access_token: String,
    /// Unix timestamp (seconds) after which the token is rejected
    pub expires_at: Option<i64>,
}

/// What the backend returned for a sign-up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpResponse {
    /// The created user, if any
    pub user_id: Option<UserId>,
    /// Present when the backend signed the user in immediately
    pub session: Option<AuthSession>,
}

/// Port for the hosted authentication service
#[async_trait]
pub trait AuthPort: Send + Sync {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
    ) -> Result<SignUpResponse, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;
}
