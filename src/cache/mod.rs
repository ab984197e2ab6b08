//! Cache Module
//!
//! Size-bounded LRU driver, its recency index, and the two-tier map driver
//! that puts the LRU in front of a persistent store.

mod lru;
mod map;
mod recency;
mod stats;


// Re-export public types
pub use lru::LruDriver;
pub use map::MapDriver;
pub use recency::RecencyIndex;
pub use stats::CacheStats;

// == Public Constants ==
/// Cache capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 8192;
