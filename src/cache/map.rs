//! Map Driver Module
//!
//! Two-tier driver: an owned LRU cache in front of a persistent store.
//! Reads go through the cache, writes go to both.

use std::path::Path;

use tracing::{debug, warn};

use crate::cache::LruDriver;
use crate::driver::{DocDriver, Driver};
use crate::error::{KvError, Result};

// == Map Driver ==
/// Persistent store with an in-memory LRU cache at its interface.
///
/// The store is the source of truth. The cache holds a subset of it and is
/// filled on read misses and on every write.
#[derive(Debug)]
pub struct MapDriver<P = DocDriver> {
    store: P,
    cache: LruDriver,
}

impl MapDriver<DocDriver> {
    // == Constructor ==
    /// Opens a filesystem store at `root` with a cache of `capacity` keys.
    pub fn open(root: impl AsRef<Path>, capacity: usize) -> Result<Self> {
        Ok(Self::with_store(DocDriver::open(root)?, capacity))
    }
}

impl<P: Driver> MapDriver<P> {
    /// Puts a cache of `capacity` keys in front of `store`.
    pub fn with_store(store: P, capacity: usize) -> Self {
        Self {
            store,
            cache: LruDriver::new(capacity),
        }
    }

    pub fn cache(&self) -> &LruDriver {
        &self.cache
    }

    pub fn store(&self) -> &P {
        &self.store
    }
}

impl<P: Driver> Driver for MapDriver<P> {
    fn get(&mut self, key: &str) -> Result<Vec<u8>> {
        match self.cache.get(key) {
            Ok(value) => return Ok(value),
            Err(KvError::NotExist(_)) => {}
            Err(err) => warn!(key, error = %err, "cache read failed, falling back to store"),
        }

        let value = self.store.get(key)?;

        // Best effort: a failed fill must not hide a good read
        match self.cache.set(key, value.clone()) {
            Ok(()) => debug!(key, "cache filled from store"),
            Err(err) => warn!(key, error = %err, "cache fill failed"),
        }
        Ok(value)
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.store.set(key, value.clone())?;
        self.cache.set(key, value)
    }

    /// Follows the store for absent keys; both tiers are always attempted.
    fn del(&mut self, key: &str) -> Result<()> {
        let stored = self.store.del(key);
        let cached = self.cache.del(key);
        stored.and(cached)
    }
}
