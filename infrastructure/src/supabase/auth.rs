//! Authentication ports backed by Supabase Auth (GoTrue)

use super::client::SupabaseClient;
use super::error::SupabaseError;
use super::rows::UserMetadataRow;
use async_trait::async_trait;
use dpc_application::{AuthError, AuthPort, AuthSession, CurrentUser, SignUpResponse, UserId};
use dpc_domain::UserMetadata;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Serialize)]
struct SignUpBody<'a> {
    email: &'a str,
    password: &'a str,
    data: UserMetadataRow,
}

#[derive(Serialize)]
struct PasswordGrantBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct UserBody {
    id: String,
}

/// Response of `/signup` and `/token`
///
/// With auto-confirm the body is a session (`access_token` + `user`); with
/// e-mail confirmation it is the bare user object.
#[derive(Debug, Deserialize)]
struct AuthBody {
    access_token: Option<String>,
    expires_at: Option<i64>,
    user: Option<UserBody>,
    id: Option<String>,
}

impl AuthBody {
    fn user_id(&self) -> Option<UserId> {
        self.user
            .as_ref()
            .map(|u| u.id.clone())
            .or_else(|| self.id.clone())
            .map(UserId::new)
    }

    fn into_session(self) -> Option<AuthSession> {
        let user_id = self.user_id()?;
        Some(AuthSession {
            user_id,
            access_token: self.access_token?,
            expires_at: self.expires_at,
        })
    }
}

#[async_trait]
impl AuthPort for SupabaseClient {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
    ) -> Result<SignUpResponse, AuthError> {
        let body = SignUpBody {
            email,
            password,
            data: UserMetadataRow::from(metadata),
        };
        let response: AuthBody = self.auth_post("signup", &[], &body).await?;

        let user_id = response.user_id();
        let session = response.into_session();
        if let Some(session) = &session {
            info!("Signed up and signed in as {}", session.user_id);
            self.set_session(Some(session.clone()));
        }
        Ok(SignUpResponse { user_id, session })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let body = PasswordGrantBody { email, password };
        let response: AuthBody = self
            .auth_post("token", &[("grant_type", "password")], &body)
            .await?;

        let session = response.into_session().ok_or_else(|| {
            AuthError::from(SupabaseError::Decode(
                "token response without session".into(),
            ))
        })?;
        info!("Signed in as {}", session.user_id);
        self.set_session(Some(session.clone()));
        Ok(session)
    }
}

#[async_trait]
impl CurrentUser for SupabaseClient {
    async fn current_user(&self) -> Option<UserId> {
        self.session().map(|s| s.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_body() {
        let body: AuthBody = serde_json::from_str(
            r#"{
                "access_token": "jwt",
                "token_type": "bearer",
                "expires_in": 3600,
                "expires_at": 1717000000,
                "refresh_token": "r",
                "user": { "id": "u-1", "email": "maria@example.com" }
            }"#,
        )
        .unwrap();
        let session = body.into_session().unwrap();
        assert_eq!(session.user_id, UserId::new("u-1"));
        assert_eq!(session.access_token, "jwt");
        assert_eq!(session.expires_at, Some(1717000000));
    }

    #[test]
    fn test_bare_user_body_has_no_session() {
        let body: AuthBody = serde_json::from_str(
            r#"{ "id": "u-2", "email": "maria@example.com", "confirmation_sent_at": "2024-06-01T00:00:00Z" }"#,
        )
        .unwrap();
        assert_eq!(body.user_id(), Some(UserId::new("u-2")));
        assert!(body.into_session().is_none());
    }

    #[test]
    fn test_sign_up_body_carries_metadata() {
        let metadata = UserMetadata {
            first_name: "Maria".into(),
            last_name: "Silva".into(),
            whatsapp: "(19) 98765-4321".into(),
            birth_date: None,
            gender: None,
            state: Some("SP".into()),
            city: Some("Campinas".into()),
            congregation: None,
        };
        let body = SignUpBody {
            email: "maria@example.com",
            password: "19987654321",
            data: UserMetadataRow::from(&metadata),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["password"], "19987654321");
        assert_eq!(json["data"]["sobrenome"], "Silva");
        assert_eq!(json["data"]["estado"], "SP");
    }

    #[tokio::test]
    async fn test_current_user_follows_session() {
        let client = SupabaseClient::new(
            "https://abc.supabase.co",
            "anon",
            std::time::Duration::from_secs(5),
        )
        .unwrap();
        assert!(client.current_user().await.is_none());

        client.set_session(Some(AuthSession {
            user_id: UserId::new("u-9"),
            access_token: "jwt".into(),
            expires_at: None,
        }));
        assert_eq!(client.current_user().await, Some(UserId::new("u-9")));
    }
}
