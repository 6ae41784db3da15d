//! The remote-procedure boundary to the native backend.

use serde_json::Value;

pub const LOAD_CONFIG: &str = "load_config";
pub const SAVE_CONFIG: &str = "save_config";
pub const GET_CONFIG_PATH: &str = "get_config_path";
pub const BACKUP_CONFIG: &str = "backup_config";

/// Any failure surfaced by the backend. The contents are opaque to callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// `invoke(command, args) -> result`, implemented by whatever hosts the backend.
#[async_trait::async_trait]
pub trait Invoke: Send + Sync + 'static {
    async fn invoke(&self, command: &str, args: Option<Value>) -> Result<Value, BackendError>;
}
