//! Current-user capability
//!
//! The quiz flow only needs to know *who* is answering, not how they signed
//! in; adapters decide how the identity is obtained.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Identifier of an authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lookup of the currently signed-in user
#[async_trait]
pub trait CurrentUser: Send + Sync {
    /// The signed-in user, or `None` when anonymous
    async fn current_user(&self) -> Option<UserId>;
}

/// Always anonymous
pub struct AnonymousUser;

#[async_trait]
impl CurrentUser for AnonymousUser {
    async fn current_user(&self) -> Option<UserId> {
        None
    }
}

/// A fixed, pre-authenticated user
pub struct FixedUser(pub UserId);

#[async_trait]
impl CurrentUser for FixedUser {
    async fn current_user(&self) -> Option<UserId> {
        Some(self.0.clone())
    }
}
