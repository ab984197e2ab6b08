//! API Handlers
//!
//! HTTP request handlers for the command server.

use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::debug;

use crate::client::Client;
use crate::config::Config;
use crate::driver::{BoxedDriver, Driver};
use crate::error::{KvError, Result};
use crate::models::{Command, CommandRequest, CommandResponse, HealthResponse};

/// Application state shared across all handlers.
///
/// Holds one atomic client; every command funnels through its lock.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<Client<BoxedDriver>>,
}

impl AppState {
    /// Creates a new AppState around the given client.
    pub fn new(client: Client<BoxedDriver>) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Creates a new AppState from configuration, opening the configured driver.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.open_client()?))
    }
}

/// Handler for PUT /
///
/// Runs one command envelope. Storage failures are reported inside the
/// response envelope; an unknown command is rejected with 400.
pub async fn command_handler(
    State(state): State<AppState>,
    Json(req): Json<CommandRequest>,
) -> Result<Json<CommandResponse>> {
    let command = req.command()?;
    debug!(%command, key = %req.key, "command received");

    // Drivers block on disk I/O; keep that off the async workers
    let client = Arc::clone(&state.client);
    let response = tokio::task::spawn_blocking(move || execute(&*client, command, req))
        .await
        .map_err(|err| KvError::Backend(err.to_string()))?;

    Ok(Json(response))
}

/// Executes a parsed command against `client` and packs the outcome.
pub fn execute<D: Driver>(client: &Client<D>, command: Command, req: CommandRequest) -> CommandResponse {
    let output = CommandResponse::new(req.key.clone());
    let key = req.key.as_str();

    let result = match command {
        Command::Get => client.get_raw(key).map(Some),
        Command::Set => client.set_raw(key, req.value).map(|()| None),
        Command::Del => client.del(key).map(|()| None),
        Command::Add => parse_delta(&req.value)
            .and_then(|delta| client.add(key, delta))
            .map(|()| None),
        Command::Dec => parse_delta(&req.value)
            .and_then(|delta| client.dec(key, delta))
            .map(|()| None),
        Command::SetNx => client.set_raw_if_absent(key, req.value).map(|()| None),
    };

    match result {
        Ok(Some(value)) => output.with_value(value),
        Ok(None) => output,
        Err(err) => {
            debug!(%command, key, error = %err, "command failed");
            output.with_error(&err)
        }
    }
}

/// Reads an ADD/DEC payload: one JSON integer.
fn parse_delta(value: &[u8]) -> Result<i64> {
    serde_json::from_slice(value).map_err(KvError::Decode)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
