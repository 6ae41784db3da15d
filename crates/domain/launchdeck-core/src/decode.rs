//! Typed decoders for backend replies. Nothing untyped gets past this module.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::AppConfig;

#[derive(Debug, thiserror::Error)]
#[error("malformed `{command}` response: {source}")]
pub struct DecodeError {
    command: String,
    source: serde_json::Error,
}

impl DecodeError {
    pub fn command(&self) -> &str {
        &self.command
    }
}

fn decode<T: DeserializeOwned>(command: &str, value: Value) -> Result<T, DecodeError> {
    serde_json::from_value(value).map_err(|source| DecodeError {
        command: command.to_string(),
        source,
    })
}

pub fn decode_config(command: &str, value: Value) -> Result<AppConfig, DecodeError> {
    decode(command, value)
}

pub fn decode_path(command: &str, value: Value) -> Result<String, DecodeError> {
    decode(command, value)
}

/// Unit replies may come back as `null` or be omitted entirely; anything else is malformed.
pub fn decode_unit(command: &str, value: Value) -> Result<(), DecodeError> {
    decode::<Option<()>>(command, value).map(|_| ())
}
