//! LRU Driver Module
//!
//! Size-bounded driver that keeps a recency index over any backing driver
//! and evicts least recently used keys in batches.

use tracing::debug;

use crate::cache::{CacheStats, RecencyIndex};
use crate::driver::{Driver, MemDriver};
use crate::error::{KvError, Result};

// == LRU Driver ==
/// Least recently used cache over a backing [`Driver`].
///
/// When a set finds the cache full, a quarter of the capacity (at least one
/// key) is evicted from the back of the recency index in one pass. The index
/// and the backing driver hold the same key set for everything written
/// through this driver.
#[derive(Debug)]
pub struct LruDriver<D = MemDriver> {
    /// Holds the bytes
    driver: D,
    /// Recency order over the keys in `driver`
    index: RecencyIndex,
    /// Maximum number of indexed keys
    capacity: usize,
    stats: CacheStats,
}

impl LruDriver<MemDriver> {
    // == Constructor ==
    /// Creates an LRU driver over a fresh in-memory store.
    pub fn new(capacity: usize) -> Self {
        Self::with_driver(capacity, MemDriver::new())
    }
}

impl<D: Driver> LruDriver<D> {
    /// Creates an LRU driver over `driver`. A zero capacity is raised to 1.
    pub fn with_driver(capacity: usize, driver: D) -> Self {
        let capacity = capacity.max(1);
        Self {
            driver,
            index: RecencyIndex::with_capacity(capacity),
            capacity,
            stats: CacheStats::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of indexed keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains(key)
    }

    /// Returns the most recently used key.
    pub fn most_recent(&self) -> Option<&str> {
        self.index.front()
    }

    /// Returns the next eviction candidate.
    pub fn least_recent(&self) -> Option<&str> {
        self.index.back()
    }

    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.iter()
    }

    /// Returns a snapshot of the counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.index.len(),
            ..self.stats
        }
    }

    /// Number of keys dropped per eviction pass.
    fn eviction_batch(&self) -> usize {
        (self.capacity / 4).max(1)
    }

    // == Evict ==
    /// Drops one batch of least recently used keys.
    fn evict(&mut self) -> Result<usize> {
        let batch = self.eviction_batch();
        let mut evicted = 0;

        while evicted < batch {
            let Some(key) = self.index.back().map(str::to_string) else {
                break;
            };
            self.forget(&key)?;
            evicted += 1;
        }

        self.stats.record_eviction_round(evicted);
        debug!(
            evicted,
            remaining = self.index.len(),
            capacity = self.capacity,
            "lru eviction"
        );
        Ok(evicted)
    }

    /// Removes an indexed key from the backing driver, then from the index.
    /// A key the backing driver already lost is only unindexed.
    fn forget(&mut self, key: &str) -> Result<()> {
        match self.driver.del(key) {
            Ok(()) | Err(KvError::NotExist(_)) => {}
            Err(err) => return Err(err),
        }
        self.index.remove(key);
        Ok(())
    }
}

impl<D: Driver> Driver for LruDriver<D> {
    fn get(&mut self, key: &str) -> Result<Vec<u8>> {
        match self.driver.get(key) {
            Ok(value) => {
                self.index.promote(key);
                self.stats.record_hit();
                Ok(value)
            }
            Err(err @ KvError::NotExist(_)) => {
                // Keep the index in step with a backing driver that lost the key
                self.index.remove(key);
                self.stats.record_miss();
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        // A rewrite relocates the key instead of counting it twice; the old
        // bytes stay in the backing driver until overwritten
        let rewrite = self.index.remove(key);

        if self.index.len() >= self.capacity {
            self.evict()?;
        }

        if let Err(err) = self.driver.set(key, value) {
            if rewrite {
                self.index.touch(key);
            }
            return Err(err);
        }
        self.index.touch(key);
        Ok(())
    }

    /// Absent keys are a silent no-op.
    fn del(&mut self, key: &str) -> Result<()> {
        if self.index.contains(key) {
            self.forget(key)?;
        }
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn fill(driver: &mut LruDriver, count: usize) {
        for i in 0..count {
            let key = i.to_string();
            driver.set(&key, key.clone().into_bytes()).unwrap();
        }
    }

    #[test]
    fn test_lru_set_and_get() {
        let mut driver = LruDriver::new(1024);

        driver.set("name", b"layerkv".to_vec()).unwrap();

        assert_eq!(driver.get("name").unwrap(), b"layerkv");
        driver.del("name").unwrap();
        assert!(matches!(driver.get("name"), Err(KvError::NotExist(_))));
    }

    #[test]
    fn test_lru_full_batch_eviction() {
        let mut driver = LruDriver::new(1024);
        assert!(driver.is_empty());

        fill(&mut driver, 1024);
        assert_eq!(driver.len(), 1024);
        assert_eq!(driver.most_recent(), Some("1023"));

        driver.set("1024", b"1024".to_vec()).unwrap();
        assert_eq!(driver.len(), 769);
        assert_eq!(driver.most_recent(), Some("1024"));

        driver.get("512").unwrap();
        assert_eq!(driver.most_recent(), Some("512"));

        assert!(matches!(driver.get("0"), Err(KvError::NotExist(_))));
        assert!(matches!(driver.get("255"), Err(KvError::NotExist(_))));
        assert!(driver.get("256").is_ok());
    }

    #[test]
    fn test_lru_eviction_deletes_from_backing() {
        let mut driver = LruDriver::new(8);
        fill(&mut driver, 9);

        // 8 / 4 = 2 evicted, then one inserted
        assert_eq!(driver.len(), 7);
        assert_eq!(driver.driver.len(), 7);
        assert!(!driver.contains("0"));
        assert!(!driver.contains("1"));
        assert_eq!(driver.least_recent(), Some("2"));

        let stats = driver.stats();
        assert_eq!(stats.evictions, 2);
        assert_eq!(stats.eviction_rounds, 1);
        assert_eq!(stats.entries, 7);
    }

    #[test]
    fn test_lru_get_promotes() {
        let mut driver = LruDriver::new(4);
        fill(&mut driver, 4);

        driver.get("0").unwrap();
        driver.set("4", b"4".to_vec()).unwrap();

        // Batch of one evicts "1", the oldest after "0" was touched
        assert!(driver.contains("0"));
        assert!(!driver.contains("1"));
        assert_eq!(driver.keys().collect::<Vec<_>>(), vec!["4", "0", "3", "2"]);
    }

    #[test]
    fn test_lru_rewrite_does_not_evict() {
        let mut driver = LruDriver::new(4);
        fill(&mut driver, 4);

        driver.set("0", b"zero".to_vec()).unwrap();

        assert_eq!(driver.len(), 4);
        assert_eq!(driver.most_recent(), Some("0"));
        assert_eq!(driver.get("0").unwrap(), b"zero");
        assert_eq!(driver.stats().evictions, 0);
    }

    /// Accepts first writes, rejects overwrites.
    #[derive(Default)]
    struct NoOverwrite(MemDriver);

    impl Driver for NoOverwrite {
        fn get(&mut self, key: &str) -> Result<Vec<u8>> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
            if self.0.get(key).is_ok() {
                return Err(KvError::Backend("disk full".to_string()));
            }
            self.0.set(key, value)
        }

        fn del(&mut self, key: &str) -> Result<()> {
            self.0.del(key)
        }
    }

    #[test]
    fn test_lru_failed_rewrite_keeps_old_value() {
        let mut driver = LruDriver::with_driver(4, NoOverwrite::default());
        driver.set("k", b"v1".to_vec()).unwrap();
        driver.set("other", b"x".to_vec()).unwrap();

        let result = driver.set("k", b"v2".to_vec());

        assert!(matches!(result, Err(KvError::Backend(_))));
        assert_eq!(driver.get("k").unwrap(), b"v1");
        assert!(driver.contains("k"));
        assert_eq!(driver.len(), 2);
    }

    #[test]
    fn test_lru_small_capacity_evicts_one_by_one() {
        for capacity in 1..4 {
            let mut driver = LruDriver::new(capacity);
            fill(&mut driver, capacity + 5);

            assert_eq!(driver.len(), capacity);
            let newest = (capacity + 4).to_string();
            assert_eq!(driver.most_recent(), Some(newest.as_str()));
        }
    }

    #[test]
    fn test_lru_zero_capacity_is_raised() {
        let mut driver = LruDriver::new(0);
        assert_eq!(driver.capacity(), 1);

        driver.set("a", b"1".to_vec()).unwrap();
        driver.set("b", b"2".to_vec()).unwrap();

        assert_eq!(driver.len(), 1);
        assert!(driver.get("b").is_ok());
    }

    #[test]
    fn test_lru_miss_does_not_touch_index() {
        let mut driver = LruDriver::new(4);
        fill(&mut driver, 2);

        assert!(driver.get("missing").is_err());

        assert_eq!(driver.keys().collect::<Vec<_>>(), vec!["1", "0"]);
        assert_eq!(driver.stats().misses, 1);
    }

    #[test]
    fn test_lru_delete_nonexistent_is_noop() {
        let mut driver = LruDriver::new(4);
        driver.del("missing").unwrap();
        assert!(driver.is_empty());
    }

    #[test]
    fn test_lru_invariant_after_eviction() {
        let capacity = 100;
        let mut driver = LruDriver::new(capacity);

        for i in 0..1000 {
            driver.set(&i.to_string(), vec![0u8]).unwrap();
            assert!(driver.len() <= capacity);
            assert_eq!(driver.len(), driver.driver.len());
        }
        // Right after an evicting set
        let mut driver = LruDriver::new(capacity);
        fill(&mut driver, capacity + 1);
        assert!(driver.len() <= capacity - capacity / 4 + 1);
    }
}
