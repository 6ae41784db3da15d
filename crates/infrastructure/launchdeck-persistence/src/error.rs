use camino::Utf8PathBuf;
use launchdeck_core::BackendError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("no configuration has been saved at {0} yet")]
    Missing(Utf8PathBuf),
    #[error("configuration at {path} is corrupt, moved aside to {quarantined}")]
    Corrupt {
        path: Utf8PathBuf,
        quarantined: Utf8PathBuf,
    },
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    Missing,
    Corrupt,
    InvalidPath,
    Io,
    Codec,
    UnknownCommand,
}

impl StorageError {
    pub fn kind(&self) -> StorageErrorKind {
        match self {
            StorageError::Missing(_) => StorageErrorKind::Missing,
            StorageError::Corrupt { .. } => StorageErrorKind::Corrupt,
            StorageError::NoConfigDir | StorageError::InvalidPath(_) => {
                StorageErrorKind::InvalidPath
            }
            StorageError::Io(_) => StorageErrorKind::Io,
            StorageError::Serde(_) => StorageErrorKind::Codec,
            StorageError::UnknownCommand(_) => StorageErrorKind::UnknownCommand,
        }
    }
}

/// Callers across the `invoke` boundary only ever see the message.
impl From<StorageError> for BackendError {
    fn from(value: StorageError) -> Self {
        BackendError::new(value.to_string())
    }
}
