//! Error types for the key-value layers
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

// == Error Kind ==
/// Coarse classification of a [`KvError`], stable across the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotExist,
    Conflict,
    Encode,
    Decode,
    Backend,
    InvalidKey,
    Overflow,
    UnknownCommand,
    Transport,
    Remote,
    Config,
}

// == KV Error Enum ==
/// Unified error type for every driver and client.
#[derive(Error, Debug)]
pub enum KvError {
    /// Key is absent
    #[error("key does not exist: {0}")]
    NotExist(String),

    /// Conditional set found the key already present
    #[error("key already exists: {0}")]
    Conflict(String),

    /// Value could not be serialized
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// Stored bytes are not the expected JSON
    #[error("decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// Storage medium failed
    #[error("backend error: {0}")]
    Backend(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Key cannot be used by this driver
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// add/dec left the i64 range
    #[error("integer overflow on key: {0}")]
    Overflow(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// HTTP transport failed before an envelope came back
    #[error("transport error: {0}")]
    Transport(String),

    /// Server reported an error inside the envelope; `kind` is what the
    /// server classified it as
    #[error("remote error: {message}")]
    Remote { kind: ErrorKind, message: String },

    /// Bad configuration value
    #[error("config error: {0}")]
    Config(String),
}

impl KvError {
    // == Kind ==
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            KvError::NotExist(_) => ErrorKind::NotExist,
            KvError::Conflict(_) => ErrorKind::Conflict,
            KvError::Encode(_) => ErrorKind::Encode,
            KvError::Decode(_) => ErrorKind::Decode,
            KvError::Backend(_) | KvError::Io(_) => ErrorKind::Backend,
            KvError::InvalidKey(_) => ErrorKind::InvalidKey,
            KvError::Overflow(_) => ErrorKind::Overflow,
            KvError::UnknownCommand(_) => ErrorKind::UnknownCommand,
            KvError::Transport(_) => ErrorKind::Transport,
            KvError::Remote { kind, .. } => *kind,
            KvError::Config(_) => ErrorKind::Config,
        }
    }

    /// Returns true for [`KvError::NotExist`].
    pub fn is_not_exist(&self) -> bool {
        matches!(self, KvError::NotExist(_))
    }

    /// Maps an I/O error from the filesystem driver, turning `NotFound` into
    /// [`KvError::NotExist`] for the given key.
    pub fn from_io(key: &str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            KvError::NotExist(key.to_string())
        } else {
            KvError::Io(err)
        }
    }
}

impl From<reqwest::Error> for KvError {
    fn from(err: reqwest::Error) -> Self {
        KvError::Transport(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for KvError {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            ErrorKind::NotExist => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Encode | ErrorKind::Decode => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::InvalidKey | ErrorKind::Overflow | ErrorKind::UnknownCommand => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::Transport | ErrorKind::Remote => StatusCode::BAD_GATEWAY,
            ErrorKind::Backend | ErrorKind::Config => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, KvError>;
