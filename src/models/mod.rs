//! Request and Response models for the command server
//!
//! This module defines the command envelope exchanged between the remote
//! client and the HTTP server, plus the health payload.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{Command, CommandRequest};
pub use responses::{CommandResponse, HealthResponse};
