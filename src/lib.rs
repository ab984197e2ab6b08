//! layerkv - layered key-value storage
//!
//! Interchangeable drivers (memory, filesystem, LRU cache, cached filesystem)
//! behind an atomic client with JSON values and counters, plus an HTTP
//! command server and a matching remote client.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod driver;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{LruDriver, MapDriver};
pub use client::{Client, RemoteClient};
pub use config::{Config, DriverKind};
pub use driver::{BoxedDriver, DocDriver, Driver, MemDriver};
pub use error::{ErrorKind, KvError, Result};
