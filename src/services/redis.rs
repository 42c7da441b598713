//! Redis-backed session store

use async_trait::async_trait;
use redis::{AsyncCommands, Client};

use crate::{
    error::{AppError, AppResult},
    models::SessionUser,
    services::sessions::SessionStore,
};

#[derive(Clone)]
pub struct RedisSessionStore {
    client: Client,
}

impl RedisSessionStore {
    /// Create a new Redis session store and check the server answers
    pub async fn new(url: &str) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Session(format!("Failed to create Redis client: {}", e)))?;

        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Session(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Session(format!("Redis connection test failed: {}", e)))?;

        Ok(Self { client })
    }

    async fn connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Session(format!("Failed to get Redis connection: {}", e)))
    }
}

fn session_key(session_id: &str) -> String {
    format!("session:{}", session_id)
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, session_id: &str) -> AppResult<Option<SessionUser>> {
        let mut conn = self.connection().await?;

        let stored: Option<String> = conn
            .get(session_key(session_id))
            .await
            .map_err(|e| AppError::Session(format!("Failed to read session from Redis: {}", e)))?;

        match stored {
            Some(json) => match serde_json::from_str(&json) {
                Ok(user) => Ok(Some(user)),
                Err(e) => {
                    // Unreadable payload (e.g. written by an older build): treat as logged out
                    tracing::warn!("Discarding malformed session payload: {}", e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn save(&self, session_id: &str, user: &SessionUser, ttl_seconds: u64) -> AppResult<()> {
        let mut conn = self.connection().await?;

        let payload = serde_json::to_string(user)
            .map_err(|e| AppError::Internal(format!("Failed to serialize session: {}", e)))?;

        conn.set_ex::<_, _, ()>(session_key(session_id), payload, ttl_seconds)
            .await
            .map_err(|e| AppError::Session(format!("Failed to store session in Redis: {}", e)))?;

        Ok(())
    }

    async fn destroy(&self, session_id: &str) -> AppResult<()> {
        let mut conn = self.connection().await?;

        conn.del::<_, ()>(session_key(session_id))
            .await
            .map_err(|e| AppError::Session(format!("Failed to delete session from Redis: {}", e)))?;

        Ok(())
    }
}
