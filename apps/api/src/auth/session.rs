use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;

/// Maps opaque session tokens to user ids.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Starts a session and returns its token.
    async fn create(&self, user_id: i32) -> Result<String, AppError>;

    /// `None` when the token is unknown or expired.
    async fn user_id(&self, token: &str) -> Result<Option<i32>, AppError>;

    async fn destroy(&self, token: &str) -> Result<(), AppError>;
}

fn session_key(token: &str) -> String {
    format!("session:{token}")
}

/// Sessions kept in Redis. The TTL is fixed at login and never extended.
pub struct RedisSessionStore {
    client: redis::Client,
    ttl_secs: u64,
}

impl RedisSessionStore {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, user_id: i32) -> Result<String, AppError> {
        let token = Uuid::new_v4().simple().to_string();
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("SETEX")
            .arg(session_key(&token))
            .arg(self.ttl_secs)
            .arg(user_id)
            .query_async::<_, ()>(&mut conn)
            .await?;
        debug!("Session created for user {user_id}");
        Ok(token)
    }

    async fn user_id(&self, token: &str) -> Result<Option<i32>, AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let user_id: Option<i32> = redis::cmd("GET")
            .arg(session_key(token))
            .query_async(&mut conn)
            .await?;
        Ok(user_id)
    }

    async fn destroy(&self, token: &str) -> Result<(), AppError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("DEL")
            .arg(session_key(token))
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemorySessionStore;
