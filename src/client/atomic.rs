//! Atomic Client
//!
//! Serializes every operation on a driver behind one mutex and adds JSON
//! values, counters and conditional writes on top.

use std::path::Path;

use parking_lot::Mutex;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;

use crate::cache::{LruDriver, MapDriver};
use crate::driver::{DocDriver, Driver, MemDriver};
use crate::error::{KvError, Result};

// == Client ==
/// Concurrency-safe façade over exactly one [`Driver`].
///
/// One lock guards the whole client, so operations on different keys still
/// run one at a time. Read-modify-write operations (`add`, `dec`,
/// `set_if_absent`, `set_if_present`) hold the lock for their full duration,
/// which makes them linearizable against each other.
#[derive(Debug)]
pub struct Client<D> {
    driver: Mutex<D>,
}

impl<D: Driver> Client<D> {
    // == Constructor ==
    pub fn new(driver: D) -> Self {
        Self {
            driver: Mutex::new(driver),
        }
    }

    /// Consumes the client and returns its driver.
    pub fn into_inner(self) -> D {
        self.driver.into_inner()
    }

    /// Runs `f` against the driver while holding the lock.
    pub fn with_driver<R>(&self, f: impl FnOnce(&mut D) -> R) -> R {
        let mut driver = self.driver.lock();
        f(&mut *driver)
    }

    // == Typed Operations ==
    /// Decodes the JSON value stored under `key`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let mut driver = self.driver.lock();
        read(&mut *driver, key)
    }

    /// Stores `value` under `key` as JSON.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let mut driver = self.driver.lock();
        write(&mut *driver, key, value)
    }

    pub fn del(&self, key: &str) -> Result<()> {
        self.driver.lock().del(key)
    }

    // == Counters ==
    /// Adds `delta` to the integer stored under `key`.
    pub fn add(&self, key: &str, delta: i64) -> Result<()> {
        self.update(key, |current| current.checked_add(delta))
    }

    /// Subtracts `delta` from the integer stored under `key`.
    pub fn dec(&self, key: &str, delta: i64) -> Result<()> {
        self.update(key, |current| current.checked_sub(delta))
    }

    /// Reads, applies `f` and writes back under one lock. `None` from `f`
    /// is an overflow and leaves the stored value alone.
    fn update(&self, key: &str, f: impl FnOnce(i64) -> Option<i64>) -> Result<()> {
        let mut driver = self.driver.lock();
        let current: i64 = read(&mut *driver, key)?;
        let next = f(current).ok_or_else(|| KvError::Overflow(key.to_string()))?;
        write(&mut *driver, key, &next)
    }

    // == Conditional Writes ==
    /// Stores `value` only if `key` is absent; `Conflict` otherwise.
    pub fn set_if_absent<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let mut driver = self.driver.lock();
        if exists(&mut *driver, key)? {
            return Err(KvError::Conflict(key.to_string()));
        }
        write(&mut *driver, key, value)
    }

    /// Stores `value` only if `key` is present; `NotExist` otherwise.
    pub fn set_if_present<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let mut driver = self.driver.lock();
        if !exists(&mut *driver, key)? {
            return Err(KvError::NotExist(key.to_string()));
        }
        write(&mut *driver, key, value)
    }

    // == Presence ==
    pub fn has(&self, key: &str) -> Result<bool> {
        exists(&mut *self.driver.lock(), key)
    }

    pub fn is_absent(&self, key: &str) -> Result<bool> {
        self.has(key).map(|present| !present)
    }

    // == Raw Bytes ==
    /// Returns the stored JSON bytes without decoding them.
    pub fn get_raw(&self, key: &str) -> Result<Vec<u8>> {
        self.driver.lock().get(key)
    }

    /// Stores already-encoded JSON. Fails with `Decode` unless `value` is a
    /// single well-formed JSON document.
    pub fn set_raw(&self, key: &str, value: Vec<u8>) -> Result<()> {
        validate(&value)?;
        self.driver.lock().set(key, value)
    }

    /// [`Client::set_raw`] that only stores when `key` is absent. The bytes
    /// are kept exactly as given.
    pub fn set_raw_if_absent(&self, key: &str, value: Vec<u8>) -> Result<()> {
        validate(&value)?;
        let mut driver = self.driver.lock();
        if exists(&mut *driver, key)? {
            return Err(KvError::Conflict(key.to_string()));
        }
        driver.set(key, value)
    }
}

// == Lock-held Helpers ==
fn read<D: Driver + ?Sized, T: DeserializeOwned>(driver: &mut D, key: &str) -> Result<T> {
    let buf = driver.get(key)?;
    serde_json::from_slice(&buf).map_err(KvError::Decode)
}

fn write<D: Driver + ?Sized, T: Serialize + ?Sized>(
    driver: &mut D,
    key: &str,
    value: &T,
) -> Result<()> {
    let buf = serde_json::to_vec(value).map_err(KvError::Encode)?;
    driver.set(key, buf)
}

fn validate(buf: &[u8]) -> Result<()> {
    serde_json::from_slice::<IgnoredAny>(buf)
        .map(|_| ())
        .map_err(KvError::Decode)
}

fn exists<D: Driver + ?Sized>(driver: &mut D, key: &str) -> Result<bool> {
    match driver.get(key) {
        Ok(_) => Ok(true),
        Err(KvError::NotExist(_)) => Ok(false),
        Err(err) => Err(err),
    }
}

// == Convenience Constructors ==
/// Client over a [`MemDriver`].
pub fn mem() -> Client<MemDriver> {
    Client::new(MemDriver::new())
}

/// Client over a [`DocDriver`] rooted at `root`.
pub fn doc(root: impl AsRef<Path>) -> Result<Client<DocDriver>> {
    Ok(Client::new(DocDriver::open(root)?))
}

/// Client over an in-memory [`LruDriver`] of `capacity` keys.
pub fn lru(capacity: usize) -> Client<LruDriver> {
    Client::new(LruDriver::new(capacity))
}

/// Client over a [`MapDriver`] rooted at `root` with `capacity` cached keys.
pub fn map(root: impl AsRef<Path>, capacity: usize) -> Result<Client<MapDriver>> {
    Ok(Client::new(MapDriver::open(root, capacity)?))
}
