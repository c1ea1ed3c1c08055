//! Cache Module
//!
//! The cache side of the read-through lookup: a key-value seam with per-key
//! expiration, plus the Redis adapter used in production and an in-process
//! adapter for local runs and tests.

mod entry;
mod memory;
mod redis;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheFault;

// Re-export public types
pub use entry::CacheEntry;
pub use memory::MemoryCache;
pub use redis::RedisCache;

// == Public Constants ==
/// Namespace prefix for product cache keys
pub const PRODUCT_KEY_PREFIX: &str = "products";

/// TTL applied to repopulated entries unless configured otherwise
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

// == Cache Lookup ==
/// Result of a successful cache read.
///
/// Transport failures are reported separately as [`CacheFault`], so a miss
/// can never be confused with an outage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// The key holds this serialized value
    Hit(String),
    /// The key is not present (or has expired)
    Absent,
}

// == Cache Trait ==
/// Key to serialized-value store with per-key expiration.
///
/// Implementations are shared by every in-flight request and must be safe
/// for concurrent use.
#[async_trait]
pub trait ProductCache: Send + Sync {
    /// Reads `key`. Absence is `Ok(CacheLookup::Absent)`, never an error.
    async fn get(&self, key: &str) -> Result<CacheLookup, CacheFault>;

    /// Writes `value` under `key`, expiring after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheFault>;
}

/// Cache key for a product identifier, e.g. `products:42`.
pub fn product_cache_key(id: i64) -> String {
    format!("{}:{}", PRODUCT_KEY_PREFIX, id)
}
