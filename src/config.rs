//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::cache::{LruDriver, MapDriver, DEFAULT_CAPACITY};
use crate::client::Client;
use crate::driver::{BoxedDriver, DocDriver, MemDriver};
use crate::error::{KvError, Result};

// == Driver Kind ==
/// Which storage stack the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    /// Volatile, unbounded
    Mem,
    /// One file per key
    Doc,
    /// Volatile, bounded by the cache capacity
    Lru,
    /// Files with an LRU cache in front
    Map,
}

impl FromStr for DriverKind {
    type Err = KvError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mem" => Ok(DriverKind::Mem),
            "doc" => Ok(DriverKind::Doc),
            "lru" => Ok(DriverKind::Lru),
            "map" => Ok(DriverKind::Map),
            other => Err(KvError::Config(format!("unknown driver: {}", other))),
        }
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverKind::Mem => "mem",
            DriverKind::Doc => "doc",
            DriverKind::Lru => "lru",
            DriverKind::Map => "map",
        };
        f.write_str(name)
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage stack behind the client
    pub driver: DriverKind,
    /// Root directory for the doc and map drivers
    pub data_dir: PathBuf,
    /// LRU capacity for the lru and map drivers
    pub cache_capacity: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DRIVER` - mem, doc, lru or map (default: lru)
    /// - `DATA_DIR` - Data root (default: `<tmp>/layerkv`)
    /// - `CACHE_CAPACITY` - LRU capacity (default: 8192)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            driver: env::var("DRIVER")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.driver),
            data_dir: env::var("DATA_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            cache_capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(defaults.cache_capacity),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// Opens the configured driver and wraps it in an atomic client.
    pub fn open_client(&self) -> Result<Client<BoxedDriver>> {
        let driver: BoxedDriver = match self.driver {
            DriverKind::Mem => Box::new(MemDriver::new()),
            DriverKind::Doc => Box::new(DocDriver::open(&self.data_dir)?),
            DriverKind::Lru => Box::new(LruDriver::new(self.cache_capacity)),
            DriverKind::Map => Box::new(MapDriver::open(&self.data_dir, self.cache_capacity)?),
        };
        Ok(Client::new(driver))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            driver: DriverKind::Lru,
            data_dir: env::temp_dir().join("layerkv"),
            cache_capacity: DEFAULT_CAPACITY,
            server_port: 8080,
        }
    }
}
