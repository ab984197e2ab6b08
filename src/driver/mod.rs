//! Driver Module
//!
//! The storage contract shared by every backend, plus the two leaf drivers:
//! a volatile in-memory map and a filesystem store.

mod doc;
mod memory;

pub use doc::DocDriver;
pub use memory::MemDriver;

use crate::error::Result;

// == Public Constants ==
/// Maximum key length accepted by the filesystem driver, in bytes
pub const MAX_KEY_LENGTH: usize = 255;

// == Driver Trait ==
/// Minimal storage capability set over byte values keyed by string.
///
/// Methods take `&mut self` because reads may reorder internal state (the
/// LRU driver promotes on every hit). Drivers are not thread-safe on their
/// own; share them through [`crate::client::Client`].
pub trait Driver {
    /// Returns the bytes stored under `key`, or `NotExist` if absent.
    fn get(&mut self, key: &str) -> Result<Vec<u8>>;

    /// Creates or overwrites `key`.
    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Removes `key`. Whether an absent key is an error is up to the driver.
    fn del(&mut self, key: &str) -> Result<()>;
}

impl<D: Driver + ?Sized> Driver for Box<D> {
    fn get(&mut self, key: &str) -> Result<Vec<u8>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        (**self).set(key, value)
    }

    fn del(&mut self, key: &str) -> Result<()> {
        (**self).del(key)
    }
}

/// A driver picked at runtime.
pub type BoxedDriver = Box<dyn Driver + Send>;
