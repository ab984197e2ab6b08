//! Remote Client
//!
//! Async client that sends command envelopes to a running server.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{KvError, Result};
use crate::models::{Command, CommandRequest, CommandResponse};

// == Remote Client ==
/// Speaks the command envelope over HTTP (`PUT <server>/`).
///
/// Atomicity comes from the server: every command runs inside the server's
/// client lock, so concurrent `add` calls from many remotes do not lose
/// updates.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    server: String,
    http: reqwest::Client,
}

impl RemoteClient {
    // == Constructor ==
    /// Creates a client for the server at `server`, e.g. `http://127.0.0.1:8080`.
    pub fn new(server: impl Into<String>) -> Self {
        Self::with_http(server, reqwest::Client::new())
    }

    /// Creates a client on a preconfigured reqwest client (timeouts, TLS).
    pub fn with_http(server: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            server: server.into(),
            http,
        }
    }

    // == Command ==
    /// Sends one envelope and returns the server's reply. Envelope errors are
    /// turned back into [`KvError`]s.
    pub async fn command(&self, request: &CommandRequest) -> Result<CommandResponse> {
        debug!(command = %request.command, key = %request.key, "remote command");
        let response = self.http.put(&self.server).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(KvError::Transport(format!("server returned {}", status)));
        }

        let output: CommandResponse = response.json().await?;
        output.into_result()
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let output = self.command(&CommandRequest::new(Command::Get, key)).await?;
        serde_json::from_slice(&output.value).map_err(KvError::Decode)
    }

    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.send_value(Command::Set, key, value).await
    }

    /// Stores `value` only if `key` is absent; `Conflict` otherwise.
    pub async fn set_if_absent<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.send_value(Command::SetNx, key, value).await
    }

    pub async fn del(&self, key: &str) -> Result<()> {
        self.command(&CommandRequest::new(Command::Del, key)).await?;
        Ok(())
    }

    pub async fn add(&self, key: &str, delta: i64) -> Result<()> {
        self.send_value(Command::Add, key, &delta).await
    }

    pub async fn dec(&self, key: &str, delta: i64) -> Result<()> {
        self.send_value(Command::Dec, key, &delta).await
    }

    async fn send_value<T: Serialize + ?Sized>(
        &self,
        command: Command,
        key: &str,
        value: &T,
    ) -> Result<()> {
        let value = serde_json::to_vec(value).map_err(KvError::Encode)?;
        let request = CommandRequest::new(command, key).with_value(value);
        self.command(&request).await?;
        Ok(())
    }
}
