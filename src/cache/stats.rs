//! Cache Statistics Module
//!
//! Counters kept by the LRU driver: hits, misses and evictions.

// == Cache Stats ==
/// Tracks LRU driver performance metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Gets answered by the backing driver
    pub hits: u64,
    /// Gets that found nothing
    pub misses: u64,
    /// Keys dropped by batch eviction
    pub evictions: u64,
    /// Eviction batches run
    pub eviction_rounds: u64,
    /// Keys currently indexed
    pub entries: usize,
}

impl CacheStats {
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any get.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Records one eviction batch that dropped `count` keys.
    pub fn record_eviction_round(&mut self, count: usize) {
        self.eviction_rounds += 1;
        self.evictions += count as u64;
    }
}
