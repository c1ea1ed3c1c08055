//! In-Memory Cache Module
//!
//! Process-local cache adapter: a HashMap of TTL entries with bounded capacity.
//! Expired entries read as absent and are dropped lazily or by the sweep task.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{CacheEntry, CacheLookup, ProductCache};
use crate::error::CacheFault;

// == Entry Table ==
#[derive(Debug)]
struct EntryTable {
    entries: HashMap<String, CacheEntry>,
    max_entries: usize,
}

impl EntryTable {
    fn get(&mut self, key: &str) -> CacheLookup {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                CacheLookup::Absent
            }
            Some(entry) => CacheLookup::Hit(entry.value.clone()),
            None => CacheLookup::Absent,
        }
    }

    fn insert(&mut self, key: &str, value: &str, ttl: Duration) {
        if !self.entries.contains_key(key) && self.entries.len() >= self.max_entries {
            self.make_room();
        }
        self.entries
            .insert(key.to_string(), CacheEntry::new(value.to_string(), ttl));
    }

    /// Frees one slot: expired entries go first, otherwise the entry closest
    /// to expiry is evicted.
    fn make_room(&mut self) {
        if self.purge_expired() > 0 {
            return;
        }
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at)
            .map(|(key, _)| key.clone());
        if let Some(key) = victim {
            debug!("Memory cache full, evicting '{}'", key);
            self.entries.remove(&key);
        }
    }

    fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }
}

// == Memory Cache ==
/// Cloneable handle to a shared in-process TTL cache.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    table: Arc<Mutex<EntryTable>>,
}

impl MemoryCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `max_entries` keys.
    pub fn new(max_entries: usize) -> Self {
        Self {
            table: Arc::new(Mutex::new(EntryTable {
                entries: HashMap::new(),
                max_entries: max_entries.max(1),
            })),
        }
    }

    /// Removes all expired entries, returning how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        self.table.lock().await.purge_expired()
    }

    /// Remaining TTL for a live key.
    pub async fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let table = self.table.lock().await;
        table
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(CacheEntry::ttl_remaining)
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.table.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ProductCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<CacheLookup, CacheFault> {
        Ok(self.table.lock().await.get(key))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheFault> {
        self.table.lock().await.insert(key, value, ttl);
        Ok(())
    }
}
