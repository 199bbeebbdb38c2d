//! Thin HTTP client for the Supabase REST (PostgREST) and Auth (GoTrue) APIs

use super::error::{Result, SupabaseError};
use dpc_application::AuthSession;
use reqwest::header::{AUTHORIZATION, CONTENT_RANGE, HeaderMap};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::RwLock;
use std::time::Duration;
use tracing::debug;

/// Shared client holding the project URL, the anon key and, once signed in,
/// the user's session
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
    session: RwLock<Option<AuthSession>>,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(SupabaseError::Config(format!(
                "'{}' is not an http(s) URL",
                base_url
            )));
        }
        if anon_key.trim().is_empty() {
            return Err(SupabaseError::Config("anon key is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dpc-diagnostic/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            anon_key: anon_key.trim().to_string(),
            session: RwLock::new(None),
        })
    }

    /// Use an existing session for subsequent requests
    pub fn with_session(self, session: AuthSession) -> Self {
        self.set_session(Some(session));
        self
    }

    pub fn session(&self) -> Option<AuthSession> {
        self.session.read().ok().and_then(|s| s.clone())
    }

    pub(crate) fn set_session(&self, session: Option<AuthSession>) {
        if let Ok(mut current) = self.session.write() {
            *current = session;
        }
    }

    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Attach the API key and the bearer token (user token when signed in)
    pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self
            .session()
            .map(|s| s.access_token)
            .unwrap_or_else(|| self.anon_key.clone());
        request
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", token))
    }

    /// `GET /rest/v1/{table}` with the given query parameters
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        debug!("GET {} {:?}", table, query);
        let response = self
            .authorize(self.http.get(self.rest_url(table)))
            .query(query)
            .send()
            .await?;
        let response = check(response).await?;
        response
            .json()
            .await
            .map_err(|e| SupabaseError::Decode(e.to_string()))
    }

    /// Exact row count via `HEAD` with `Prefer: count=exact`
    pub(crate) async fn count(&self, table: &str, column: &str) -> Result<usize> {
        let response = self
            .authorize(self.http.head(self.rest_url(table)))
            .query(&[("select", column)])
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = check(response).await?;
        content_range_total(response.headers()).ok_or(SupabaseError::MissingCount)
    }

    /// Insert-or-update rows, resolving conflicts on `on_conflict`
    pub(crate) async fn upsert<T: Serialize + ?Sized>(
        &self,
        table: &str,
        on_conflict: &str,
        rows: &T,
    ) -> Result<()> {
        let response = self
            .authorize(self.http.post(self.rest_url(table)))
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(rows)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// Plain insert of one or more rows
    pub(crate) async fn insert<T: Serialize + ?Sized>(&self, table: &str, rows: &T) -> Result<()> {
        let response = self
            .authorize(self.http.post(self.rest_url(table)))
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// `POST /auth/v1/{path}` authenticated with the anon key only
    pub(crate) async fn auth_post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<T> {
        let response = self
            .http
            .post(self.auth_url(path))
            .query(query)
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
            .json(body)
            .send()
            .await?;
        let response = check(response).await?;
        response
            .json()
            .await
            .map_err(|e| SupabaseError::Decode(e.to_string()))
    }
}

/// Turn a non-2xx response into [`SupabaseError::Api`]
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SupabaseError::api(status.as_u16(), &body))
}

fn content_range_total(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(CONTENT_RANGE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_content_range_total)
}

/// Total from a PostgREST `Content-Range` value (`0-32/33`, `*/0`)
///
/// Returns `None` when the total is unknown (`0-9/*`) or malformed.
pub fn parse_content_range_total(value: &str) -> Option<usize> {
    let (_, total) = value.trim().rsplit_once('/')?;
    total.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dpc_application::UserId;
    use reqwest::header::HeaderValue;

    fn client() -> SupabaseClient {
        SupabaseClient::new(
            "https://abc.supabase.co/",
            "anon-key",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("0-32/33"), Some(33));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total(" 0-0/120 "), Some(120));
        assert_eq!(parse_content_range_total("0-9/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    #[test]
    fn test_content_range_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(content_range_total(&headers), None);
        headers.insert(CONTENT_RANGE, HeaderValue::from_static("0-4/5"));
        assert_eq!(content_range_total(&headers), Some(5));
    }

    #[test]
    fn test_urls_strip_trailing_slash() {
        let client = client();
        assert_eq!(
            client.rest_url("perguntas"),
            "https://abc.supabase.co/rest/v1/perguntas"
        );
        assert_eq!(
            client.auth_url("signup"),
            "https://abc.supabase.co/auth/v1/signup"
        );
    }

    #[test]
    fn test_rejects_bad_configuration() {
        assert!(matches!(
            SupabaseClient::new("abc.supabase.co", "key", Duration::from_secs(5)),
            Err(SupabaseError::Config(_))
        ));
        assert!(matches!(
            SupabaseClient::new("https://abc.supabase.co", " ", Duration::from_secs(5)),
            Err(SupabaseError::Config(_))
        ));
    }

    #[test]
    fn test_bearer_switches_to_user_token() {
        let client = client();
        let request = client
            .authorize(client.http.get(client.rest_url("perfis")))
            .build()
            .unwrap();
        assert_eq!(request.headers()["apikey"], "anon-key");
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer anon-key");

        let client = client.with_session(AuthSession {
            user_id: UserId::new("u-1"),
            access_token: "user-jwt".into(),
            expires_at: None,
        });
        let request = client
            .authorize(client.http.get(client.rest_url("perfis")))
            .build()
            .unwrap();
        assert_eq!(request.headers()[AUTHORIZATION], "Bearer user-jwt");
        assert_eq!(client.session().unwrap().user_id.as_str(), "u-1");
    }
}
