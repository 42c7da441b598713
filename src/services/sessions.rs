//! Server-side sessions: session id -> authenticated user snapshot

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    config::SessionConfig,
    error::AppResult,
    models::{SessionUser, User},
};

/// Backing store for sessions. Entries must disappear after their TTL.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, session_id: &str) -> AppResult<Option<SessionUser>>;

    async fn save(&self, session_id: &str, user: &SessionUser, ttl_seconds: u64) -> AppResult<()>;

    /// Removing an unknown id is not an error
    async fn destroy(&self, session_id: &str) -> AppResult<()>;
}

#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    config: SessionConfig,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>, config: SessionConfig) -> Self {
        Self { store, config }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    pub fn secure_cookie(&self) -> bool {
        self.config.secure_cookie
    }

    /// Bind a user to a fresh session and return its id
    pub async fn open(&self, user: &User) -> AppResult<(String, SessionUser)> {
        let session_id = Uuid::new_v4().to_string();
        let snapshot = SessionUser::from_user(user);

        self.store
            .save(&session_id, &snapshot, self.config.max_age_seconds)
            .await?;

        tracing::debug!(user_id = user.id, role = %user.role, "Session opened");
        Ok((session_id, snapshot))
    }

    /// Resolve a session id; unknown and expired ids yield `None`
    pub async fn resolve(&self, session_id: &str) -> AppResult<Option<SessionUser>> {
        if session_id.is_empty() {
            return Ok(None);
        }
        self.store.load(session_id).await
    }

    pub async fn close(&self, session_id: &str) -> AppResult<()> {
        self.store.destroy(session_id).await
    }
}
