//! Product Lookup Service
//!
//! Cache-aside retrieval of products. The cache is consulted first; only an
//! explicit miss falls through to the store, and the store's answer is written
//! back with a fixed TTL on a best-effort basis.
//!
//! Every step is an `.await` point. Dropping the returned future (client
//! disconnect, request timeout) abandons the remaining steps; pooled cache and
//! store connections are guards that go back to their pools on drop.
//!
//! There is no single-flight: concurrent misses for one id each query the
//! store and each write the same payload back.

mod stats;

#[cfg(test)]
pub(crate) mod fakes;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::cache::{product_cache_key, CacheLookup, ProductCache, DEFAULT_CACHE_TTL};
use crate::error::{LookupError, Result};
use crate::models::Product;
use crate::store::ProductStore;

pub use stats::{LookupStats, StatsSnapshot};

/// Read-through product lookup over an injected cache and store.
pub struct ProductLookupService {
    cache: Arc<dyn ProductCache>,
    store: Arc<dyn ProductStore>,
    ttl: Duration,
    stats: LookupStats,
}

impl ProductLookupService {
    /// Creates a service using the default one-hour TTL.
    pub fn new(cache: Arc<dyn ProductCache>, store: Arc<dyn ProductStore>) -> Self {
        Self::with_ttl(cache, store, DEFAULT_CACHE_TTL)
    }

    /// Creates a service that repopulates the cache with `ttl`.
    pub fn with_ttl(
        cache: Arc<dyn ProductCache>,
        store: Arc<dyn ProductStore>,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            store,
            ttl,
            stats: LookupStats::new(),
        }
    }

    /// TTL applied to repopulated entries.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    // == Get Product ==
    /// Returns the product for `id`.
    ///
    /// # Errors
    /// - `LookupError::Internal` if the cache is unreachable or holds an
    ///   undecodable entry (the store is not consulted in either case), or if
    ///   the store's record cannot be serialized.
    /// - `LookupError::NotFound` for any store failure, including an
    ///   unreachable store.
    pub async fn get_product(&self, id: i64) -> Result<Product> {
        let key = product_cache_key(id);

        match self.cache.get(&key).await {
            Ok(CacheLookup::Hit(payload)) => return self.decode_cached(&key, &payload),
            Ok(CacheLookup::Absent) => {
                self.stats.record_miss();
                debug!("Cache miss for '{}', querying store", key);
            }
            Err(fault) => {
                self.stats.record_fault();
                error!("Error retrieving '{}' from cache: {}", key, fault);
                return Err(fault.into());
            }
        }

        let product = self.store.find_by_id(id).await.map_err(|e| {
            // Absent rows and unreachable stores both surface as not-found.
            self.stats.record_store_miss();
            warn!("Error retrieving product {} from store: {}", id, e);
            LookupError::NotFound(id)
        })?;

        let payload = serde_json::to_string(&product).map_err(|e| {
            error!("Error serializing product {}: {}", id, e);
            LookupError::Internal(format!("failed to serialize product {}: {}", id, e))
        })?;

        // Best-effort write-back. The store read succeeded, so a cache failure
        // here is logged and counted but must not fail the request.
        if let Err(fault) = self.cache.set(&key, &payload, self.ttl).await {
            self.stats.record_write_back_failure();
            warn!("Error storing '{}' in cache: {}", key, fault);
        }

        Ok(product)
    }

    fn decode_cached(&self, key: &str, payload: &str) -> Result<Product> {
        match serde_json::from_str(payload) {
            Ok(product) => {
                self.stats.record_hit();
                debug!("Cache hit for '{}'", key);
                Ok(product)
            }
            Err(e) => {
                self.stats.record_fault();
                error!("Error decoding cached entry '{}': {}", key, e);
                Err(LookupError::Internal(format!(
                    "corrupt cache entry '{}': {}",
                    key, e
                )))
            }
        }
    }
}
