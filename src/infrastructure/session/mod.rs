//! Redis-backed session storage.
//!
//! | key | value | TTL |
//! |-----|-------|-----|
//! | `session:{session_id}` | role as an integer | `session.ttl_days` |

use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use std::time::Duration;
use tracing::{error, info};

use crate::domain::repositories::SessionStore;
use crate::domain::value_objects::Role;
use crate::presentation::middleware::error::AppError;

pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    /// Connect to Redis at `redis_url` (e.g. `redis://localhost:6379`)
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        info!("Connected to Redis session store");
        Ok(Self { conn })
    }

    fn session_key(session_id: &str) -> String {
        format!("session:{session_id}")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn set(&self, session_id: &str, role: Role, ttl: Duration) -> Result<(), AppError> {
        let key = Self::session_key(session_id);
        let mut conn = self.conn.clone();

        let _: () = conn.set_ex(&key, role.as_i32(), ttl.as_secs()).await.map_err(|e| {
            error!(error = %e, "Failed to store session");
            AppError::from(e)
        })?;
        Ok(())
    }

    async fn get(&self, session_id: &str) -> Result<Role, AppError> {
        let key = Self::session_key(session_id);
        let mut conn = self.conn.clone();

        let value: Option<i32> = conn.get(&key).await.map_err(|e| {
            error!(error = %e, "Failed to read session");
            AppError::from(e)
        })?;

        let value = value.ok_or_else(|| AppError::not_found("session"))?;
        Role::try_from(value).map_err(|e| AppError::SessionStore {
            message: format!("Session holds invalid role {value}: {e}"),
        })
    }

    async fn delete(&self, session_id: &str) -> Result<(), AppError> {
        let key = Self::session_key(session_id);
        let mut conn = self.conn.clone();

        let _: () = conn.del(&key).await.map_err(|e| {
            error!(error = %e, "Failed to delete session");
            AppError::from(e)
        })?;
        Ok(())
    }
}
