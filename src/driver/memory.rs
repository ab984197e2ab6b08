//! Memory Driver
//!
//! Volatile key-value storage backed by a HashMap.

use std::collections::HashMap;

use crate::driver::Driver;
use crate::error::{KvError, Result};

// == Mem Driver ==
/// Stores everything in process memory. There is no expiration, so the map
/// grows until keys are deleted; wrap it in an LRU driver to bound it.
#[derive(Debug, Default)]
pub struct MemDriver {
    data: HashMap<String, Vec<u8>>,
}

impl MemDriver {
    /// Creates an empty driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Driver for MemDriver {
    fn get(&mut self, key: &str) -> Result<Vec<u8>> {
        self.data
            .get(key)
            .cloned()
            .ok_or_else(|| KvError::NotExist(key.to_string()))
    }

    fn set(&mut self, key: &str, value: Vec<u8>) -> Result<()> {
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    /// Absent keys are a silent no-op.
    fn del(&mut self, key: &str) -> Result<()> {
        self.data.remove(key);
        Ok(())
    }
}
