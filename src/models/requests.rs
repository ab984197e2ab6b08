//! Request DTOs for the command server
//!
//! Defines the command envelope sent to `PUT /`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::KvError;

// == Command ==
/// Operation named by an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Get,
    Set,
    Del,
    Add,
    Dec,
    /// Set only if absent
    SetNx,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Get => "GET",
            Command::Set => "SET",
            Command::Del => "DEL",
            Command::Add => "ADD",
            Command::Dec => "DEC",
            Command::SetNx => "SETNX",
        }
    }
}

impl FromStr for Command {
    type Err = KvError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Command::Get),
            "SET" => Ok(Command::Set),
            "DEL" => Ok(Command::Del),
            "ADD" => Ok(Command::Add),
            "DEC" => Ok(Command::Dec),
            "SETNX" => Ok(Command::SetNx),
            _ => Err(KvError::UnknownCommand(s.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request envelope for the command endpoint (PUT /)
///
/// # Fields
/// - `command`: one of GET, SET, DEL, ADD, DEC, SETNX (any case)
/// - `key`: the key to operate on
/// - `value`: JSON bytes; the document for SET/SETNX, an integer delta for ADD/DEC
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: String,
    pub key: String,
    #[serde(default)]
    pub value: Vec<u8>,
}

impl CommandRequest {
    /// Creates an envelope without a value.
    pub fn new(command: Command, key: impl Into<String>) -> Self {
        Self {
            command: command.as_str().to_string(),
            key: key.into(),
            value: Vec::new(),
        }
    }

    /// Attaches the value payload.
    pub fn with_value(mut self, value: Vec<u8>) -> Self {
        self.value = value;
        self
    }

    /// Parses the command field.
    pub fn command(&self) -> Result<Command, KvError> {
        self.command.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse_case_insensitive() {
        assert_eq!("get".parse::<Command>().unwrap(), Command::Get);
        assert_eq!("SetNx".parse::<Command>().unwrap(), Command::SetNx);
        assert!(matches!(
            "FLY".parse::<Command>(),
            Err(KvError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_command_request_deserialize_without_value() {
        let json = r#"{"command": "del", "key": "name"}"#;
        let req: CommandRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.command().unwrap(), Command::Del);
        assert_eq!(req.key, "name");
        assert!(req.value.is_empty());
    }

    #[test]
    fn test_command_request_builder() {
        let req = CommandRequest::new(Command::Add, "n").with_value(b"5".to_vec());
        assert_eq!(req.command, "ADD");
        assert_eq!(req.value, b"5");
    }
}
