//! Client Module
//!
//! The atomic client that serializes access to a driver, and the remote
//! client that reaches one over HTTP.

mod atomic;
mod remote;

pub use atomic::{doc, lru, map, mem, Client};
pub use remote::RemoteClient;
