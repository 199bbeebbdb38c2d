//! Error types for the Supabase adapter

use dpc_application::{AuthError, StoreError};
use thiserror::Error;

/// Result type alias for Supabase operations
pub type Result<T> = std::result::Result<T, SupabaseError>;

/// Errors that can occur when talking to the Supabase REST and Auth APIs
#[derive(Error, Debug)]
pub enum SupabaseError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Missing Content-Range header in count response")]
    MissingCount,
}

impl SupabaseError {
    /// Build an API error from a status and the raw response body
    pub fn api(status: u16, body: &str) -> Self {
        SupabaseError::Api {
            status,
            message: error_message(body),
        }
    }
}

/// Pull the human-readable message out of a PostgREST or GoTrue error body
///
/// PostgREST uses `message`, GoTrue uses `msg` or `error_description`.
pub fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "msg", "error_description", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty response body".to_string()
    } else {
        trimmed.to_string()
    }
}

impl From<SupabaseError> for StoreError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::Http(e) if e.is_timeout() => StoreError::Timeout,
            SupabaseError::Http(e) => StoreError::Unavailable(e.to_string()),
            SupabaseError::Api { status, message } => StoreError::Rejected { status, message },
            SupabaseError::Decode(msg) => StoreError::Decode(msg),
            SupabaseError::MissingCount => {
                StoreError::Decode("missing Content-Range header".to_string())
            }
            SupabaseError::Config(msg) => StoreError::Unavailable(msg),
        }
    }
}

impl From<SupabaseError> for AuthError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::Api { message, .. } if message.contains("already registered") => {
                AuthError::AlreadyRegistered
            }
            SupabaseError::Api { message, .. } if message.contains("Invalid login credentials") => {
                AuthError::InvalidCredentials
            }
            SupabaseError::Api { message, .. } if message.contains("Email not confirmed") => {
                AuthError::EmailNotConfirmed
            }
            SupabaseError::Api { message, .. } => AuthError::Rejected(message),
            other => AuthError::Unavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_postgrest_body() {
        let body = r#"{"code":"42501","details":null,"hint":null,"message":"new row violates row-level security policy"}"#;
        assert_eq!(
            error_message(body),
            "new row violates row-level security policy"
        );
    }

    #[test]
    fn test_error_message_from_gotrue_bodies() {
        assert_eq!(
            error_message(r#"{"code":422,"msg":"User already registered"}"#),
            "User already registered"
        );
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            "Invalid login credentials"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_message(""), "empty response body");
    }

    #[test]
    fn test_auth_error_mapping() {
        let err: AuthError = SupabaseError::api(422, r#"{"msg":"User already registered"}"#).into();
        assert_eq!(err, AuthError::AlreadyRegistered);

        let err: AuthError = SupabaseError::api(
            400,
            r#"{"error_description":"Invalid login credentials"}"#,
        )
        .into();
        assert_eq!(err, AuthError::InvalidCredentials);

        let err: AuthError = SupabaseError::api(400, r#"{"msg":"Email not confirmed"}"#).into();
        assert_eq!(err, AuthError::EmailNotConfirmed);

        let err: AuthError = SupabaseError::api(429, r#"{"msg":"Too many requests"}"#).into();
        assert_eq!(err, AuthError::Rejected("Too many requests".into()));
    }

    #[test]
    fn test_store_error_mapping() {
        let err: StoreError = SupabaseError::api(401, r#"{"message":"JWT expired"}"#).into();
        assert_eq!(
            err,
            StoreError::Rejected {
                status: 401,
                message: "JWT expired".into()
            }
        );
        let err: StoreError = SupabaseError::Decode("bad".into()).into();
        assert_eq!(err, StoreError::Decode("bad".into()));
    }
}
