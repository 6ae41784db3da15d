use std::fmt;

use launchdeck_core::{BackendError, DecodeError};

/// The orchestrator operations that contend for the single in-flight slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Save,
    Backup,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Load => "load",
            Operation::Save => "save",
            Operation::Backup => "backup",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("cannot {requested} configuration while a {in_flight} is in progress")]
    Busy {
        requested: Operation,
        in_flight: Operation,
    },
    #[error("no async runtime available to schedule auto-save")]
    NoRuntime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    Backend,
    Decode,
    Busy,
    NoRuntime,
}

impl ConfigError {
    pub fn kind(&self) -> ConfigErrorKind {
        match self {
            ConfigError::Backend(_) => ConfigErrorKind::Backend,
            ConfigError::Decode(_) => ConfigErrorKind::Decode,
            ConfigError::Busy { .. } => ConfigErrorKind::Busy,
            ConfigError::NoRuntime => ConfigErrorKind::NoRuntime,
        }
    }
}
