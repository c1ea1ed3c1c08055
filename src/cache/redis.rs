//! Redis Cache Module
//!
//! Production cache adapter backed by a deadpool-redis connection pool.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Connection, Pool, Runtime};
use tracing::{debug, info};

use crate::cache::{CacheLookup, ProductCache};
use crate::error::CacheFault;

/// Redis-backed product cache.
///
/// Connections are checked out per command and returned to the pool when the
/// guard drops, including when the calling future is cancelled mid-flight.
#[derive(Clone)]
pub struct RedisCache {
    pool: Pool,
}

impl RedisCache {
    /// Wraps an existing pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Builds a pool for `url`. No connection is opened until the first command.
    pub fn connect(url: &str, pool_size: usize) -> Result<Self, CacheFault> {
        let pool = Config::from_url(url)
            .builder()
            .map_err(|e| CacheFault::Connection(format!("Invalid Redis config: {}", e)))?
            .max_size(pool_size)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| CacheFault::Connection(format!("Failed to create Redis pool: {}", e)))?;

        info!("Redis pool created (max_size={})", pool_size);
        Ok(Self::new(pool))
    }

    async fn conn(&self) -> Result<Connection, CacheFault> {
        self.pool
            .get()
            .await
            .map_err(|e| CacheFault::Connection(format!("Failed to get Redis connection: {}", e)))
    }
}

/// Redis `SET EX` takes whole seconds and rejects zero.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl ProductCache for RedisCache {
    async fn get(&self, key: &str) -> Result<CacheLookup, CacheFault> {
        let mut conn = self.conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| CacheFault::Command(format!("GET '{}': {}", key, e)))?;

        match value {
            Some(payload) => {
                debug!("Redis hit for key '{}'", key);
                Ok(CacheLookup::Hit(payload))
            }
            None => {
                debug!("Redis miss for key '{}'", key);
                Ok(CacheLookup::Absent)
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheFault> {
        let mut conn = self.conn().await?;
        let seconds = ttl_seconds(ttl);

        conn.set_ex::<_, _, ()>(key, value, seconds)
            .await
            .map_err(|e| CacheFault::Command(format!("SET '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}s", key, seconds);
        Ok(())
    }
}
