//! API Module
//!
//! HTTP handlers and routing for the command server.
//!
//! # Endpoints
//! - `PUT /` - Run one command envelope (GET, SET, DEL, ADD, DEC, SETNX)
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
