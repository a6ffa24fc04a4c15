use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::Error;
use crate::identity::Identity;
use crate::repository::UserRepository;

#[derive(Debug, Clone)]
struct SessionRecord {
    identity: Identity,
    expires_at: DateTime<Utc>,
}

/// A session handed back by a successful login.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub identity: Identity,
    pub expires_at: DateTime<Utc>,
}

/// Server-held session state: opaque token -> identity, with a fixed TTL
/// from issuance. No renewal on activity; expired entries are dropped
/// lazily on resolve.
pub struct SessionAuthority {
    users: Arc<dyn UserRepository>,
    sessions: Mutex<HashMap<String, SessionRecord>>,
    ttl: Duration,
}

impl SessionAuthority {
    pub fn new(users: Arc<dyn UserRepository>, ttl_seconds: i64) -> Self {
        Self {
            users,
            sessions: Mutex::new(HashMap::new()),
            ttl: Duration::seconds(ttl_seconds),
        }
    }

    /// Looks the user up by exact username/password match and mints a new
    /// session bound to their identity.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedSession, Error> {
        let user = self
            .users
            .find_by_credentials(username, password)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        let identity = Identity {
            username: user.username,
            email: user.email,
        };
        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + self.ttl;

        self.lock().insert(
            token.clone(),
            SessionRecord {
                identity: identity.clone(),
                expires_at,
            },
        );

        tracing::info!(username = %identity.username, "session issued");
        Ok(IssuedSession {
            token,
            identity,
            expires_at,
        })
    }

    /// Resolves a token to its bound identity, or `Unauthenticated` when the
    /// token is absent or past its TTL.
    pub fn resolve(&self, token: &str) -> Result<Identity, Error> {
        let mut sessions = self.lock();
        match sessions.get(token) {
            Some(record) if record.expires_at > Utc::now() => Ok(record.identity.clone()),
            Some(_) => {
                sessions.remove(token);
                Err(Error::Unauthenticated)
            }
            None => Err(Error::Unauthenticated),
        }
    }

    /// Destroys a session. Idempotent: revoking an unknown token is a no-op.
    pub fn revoke(&self, token: &str) {
        self.lock().remove(token);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, SessionRecord>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
