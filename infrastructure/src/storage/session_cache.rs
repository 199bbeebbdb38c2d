//! Signed-in session kept between runs

use dpc_application::{AuthSession, KeyValueStore, UserId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Storage key of the cached session
pub const SESSION_CACHE_KEY: &str = "dpc.auth.session";

#[derive(Serialize, Deserialize)]
struct CachedSession {
    user_id: UserId,
    access_token: String,
    expires_at: Option<i64>,
}

pub struct SessionCache {
    storage: Arc<dyn KeyValueStore>,
}

impl SessionCache {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// The cached session, unless missing, unreadable or expired at `now`
    /// (Unix seconds)
    pub fn load(&self, now: i64) -> Option<AuthSession> {
        let raw = match self.storage.get(SESSION_CACHE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read cached session: {}", e);
                return None;
            }
        };
        let cached: CachedSession = match serde_json::from_str(&raw) {
            Ok(cached) => cached,
            Err(e) => {
                warn!("Cached session is unreadable: {}", e);
                return None;
            }
        };
        if cached.expires_at.is_some_and(|at| at <= now) {
            debug!("Cached session for {} has expired", cached.user_id);
            self.clear();
            return None;
        }
        Some(AuthSession {
            user_id: cached.user_id,
            access_token: cached.access_token,
            expires_at: cached.expires_at,
        })
    }

    pub fn save(&self, session: &AuthSession) {
        let cached = CachedSession {
            user_id: session.user_id.clone(),
            access_token: session.access_token.clone(),
            expires_at: session.expires_at,
        };
        let result = serde_json::to_string(&cached)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.storage
                    .set(SESSION_CACHE_KEY, &json)
                    .map_err(|e| e.to_string())
            });
        if let Err(e) = result {
            warn!("Failed to cache session: {}", e);
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(SESSION_CACHE_KEY) {
            warn!("Failed to clear cached session: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileKeyValueStore;

    fn session(expires_at: Option<i64>) -> AuthSession {
        AuthSession {
            user_id: UserId::new("u-1"),
            access_token: "jwt".into(),
            expires_at,
        }
    }

    #[test]
    fn test_round_trip_until_expiry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::new(Arc::new(FileKeyValueStore::new(dir.path())));

        assert!(cache.load(0).is_none());
        cache.save(&session(Some(1_000)));
        assert_eq!(cache.load(999), Some(session(Some(1_000))));
        assert!(cache.load(1_000).is_none());
        // Expired sessions are dropped from storage
        assert!(cache.load(0).is_none());
    }

    #[test]
    fn test_session_without_expiry_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SessionCache::new(Arc::new(FileKeyValueStore::new(dir.path())));
        cache.save(&session(None));
        assert!(cache.load(i64::MAX).is_some());
        cache.clear();
        assert!(cache.load(0).is_none());
    }
}
