//! Test doubles for the lookup service: a store that counts queries and can
//! play dead, and a cache whose reads or writes fail on demand.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::cache::{CacheLookup, MemoryCache, ProductCache};
use crate::error::{CacheFault, StoreError};
use crate::models::Product;
use crate::store::{MemoryProductStore, ProductStore};

pub fn widget() -> Product {
    Product {
        id: 42,
        name: "Widget".to_string(),
        description: "A widget".to_string(),
        price: 9.99,
    }
}

// == Counting Store ==
pub struct CountingStore {
    inner: MemoryProductStore,
    queries: AtomicUsize,
    unreachable: bool,
    delay: Option<Duration>,
}

impl CountingStore {
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            inner: MemoryProductStore::with_products(products),
            queries: AtomicUsize::new(0),
            unreachable: false,
            delay: None,
        }
    }

    /// Every query fails as if the database were down.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::with_products([])
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductStore for CountingStore {
    async fn find_by_id(&self, id: i64) -> Result<Product, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.unreachable {
            return Err(StoreError::Connection("connection refused".to_string()));
        }
        self.inner.find_by_id(id).await
    }
}

// == Flaky Cache ==
pub struct FlakyCache {
    inner: MemoryCache,
    fail_reads: bool,
    fail_writes: bool,
    write_attempts: AtomicUsize,
}

impl FlakyCache {
    pub fn failing_reads() -> Self {
        Self::new(true, false)
    }

    pub fn failing_writes() -> Self {
        Self::new(false, true)
    }

    fn new(fail_reads: bool, fail_writes: bool) -> Self {
        Self {
            inner: MemoryCache::new(100),
            fail_reads,
            fail_writes,
            write_attempts: AtomicUsize::new(0),
        }
    }

    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductCache for FlakyCache {
    async fn get(&self, key: &str) -> Result<CacheLookup, CacheFault> {
        if self.fail_reads {
            return Err(CacheFault::Connection("i/o timeout".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheFault> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(CacheFault::Command("READONLY replica".to_string()));
        }
        self.inner.set(key, value, ttl).await
    }
}
