//! Revoked-token set for logout
//!
//! Keys are token `jti`s, kept until the token would have expired anyway.

use crate::error::{AppError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use redis::aio::ConnectionManager;
use std::time::{Duration, Instant};

#[async_trait]
pub trait TokenRevocationStore: Send + Sync {
    /// Revoke `jti` for `ttl_secs` seconds
    async fn revoke(&self, jti: &str, ttl_secs: u64) -> Result<()>;

    async fn is_revoked(&self, jti: &str) -> Result<bool>;
}

fn revocation_key(jti: &str) -> String {
    format!("token:revoked:{}", jti)
}

/// Redis-backed store, shared across replicas
///
/// **Key format**: `token:revoked:{jti}`, expiring with the token.
#[derive(Clone)]
pub struct RedisRevocationStore {
    redis: ConnectionManager,
}

impl RedisRevocationStore {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }

    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| AppError::Internal(format!("Invalid Redis URL: {}", e)))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection failed: {}", e)))?;
        Ok(Self::new(manager))
    }
}

#[async_trait]
impl TokenRevocationStore for RedisRevocationStore {
    async fn revoke(&self, jti: &str, ttl_secs: u64) -> Result<()> {
        // EX 0 is rejected by Redis
        let ttl = ttl_secs.max(1);
        let mut conn = self.redis.clone();

        redis::cmd("SET")
            .arg(revocation_key(jti))
            .arg(1)
            .arg("EX")
            .arg(ttl)
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to revoke token: {}", e)))?;

        tracing::info!(jti = %jti, ttl = ttl, "Token revoked");
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool> {
        let mut conn = self.redis.clone();

        let exists: bool = redis::cmd("EXISTS")
            .arg(revocation_key(jti))
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to check revocation: {}", e)))?;

        Ok(exists)
    }
}

/// Process-local store used when no Redis is configured
#[derive(Debug, Default)]
pub struct InMemoryRevocationStore {
    entries: DashMap<String, Instant>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, expires_at| *expires_at > now);
    }
}

#[async_trait]
impl TokenRevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, jti: &str, ttl_secs: u64) -> Result<()> {
        self.purge_expired();
        self.entries.insert(
            revocation_key(jti),
            Instant::now() + Duration::from_secs(ttl_secs.max(1)),
        );
        tracing::info!(jti = %jti, ttl = ttl_secs, "Token revoked");
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool> {
        let key = revocation_key(jti);
        let revoked = self
            .entries
            .get(&key)
            .map(|expires_at| *expires_at > Instant::now())
            .unwrap_or(false);
        Ok(revoked)
    }
}
