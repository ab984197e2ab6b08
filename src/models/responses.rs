//! Response DTOs for the command server
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, KvError};

/// Response envelope for the command endpoint (PUT /)
///
/// `error` is empty on success. On failure it carries the message and
/// `kind` says which error it was.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandResponse {
    #[serde(default)]
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    pub key: String,
    #[serde(default)]
    pub value: Vec<u8>,
}

impl CommandResponse {
    /// Creates an empty success envelope for `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: Vec<u8>) -> Self {
        self.value = value;
        self
    }

    /// Records a failure in the envelope.
    pub fn with_error(mut self, err: &KvError) -> Self {
        self.error = err.to_string();
        self.kind = Some(err.kind());
        self
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_empty()
    }

    /// Turns an error envelope back into a [`KvError`].
    pub fn into_result(self) -> Result<Self, KvError> {
        if self.is_ok() {
            return Ok(self);
        }
        Err(match self.kind {
            Some(ErrorKind::NotExist) => KvError::NotExist(self.key),
            Some(ErrorKind::Conflict) => KvError::Conflict(self.key),
            Some(ErrorKind::Overflow) => KvError::Overflow(self.key),
            kind => KvError::Remote {
                kind: kind.unwrap_or(ErrorKind::Remote),
                message: self.error,
            },
        })
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
