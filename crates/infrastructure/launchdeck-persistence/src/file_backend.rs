use std::fs;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use launchdeck_core::ipc::{self, Invoke};
use launchdeck_core::{AppConfig, BackendError};
use serde_json::Value;
use tracing::{debug, info};

use crate::codec::{decode_config, encode_config};
use crate::maintenance::{atomic_write, quarantine_corrupt_file, unique_stamp};
use crate::paths::{backup_path, default_config_path};
use crate::StorageError;

/// Local backend that keeps the configuration document in memory and persists it
/// as one JSON file. Serves the config commands over [`Invoke`].
///
/// Clones share the same document and file.
#[derive(Clone)]
pub struct JsonFileBackend {
    inner: Arc<Inner>,
}

struct Inner {
    path: Utf8PathBuf,
    document: Mutex<AppConfig>,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                path: path.into(),
                document: Mutex::new(AppConfig::default()),
            }),
        }
    }

    pub fn at_default_location() -> Result<Self, StorageError> {
        Ok(Self::new(default_config_path()?))
    }

    pub fn path(&self) -> &Utf8Path {
        &self.inner.path
    }

    fn document_guard(&self) -> MutexGuard<'_, AppConfig> {
        self.inner
            .document
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn document(&self) -> AppConfig {
        self.document_guard().clone()
    }

    /// Mutates the backend-side document. Nothing is written until the next save.
    pub fn update<R>(&self, f: impl FnOnce(&mut AppConfig) -> R) -> R {
        f(&mut self.document_guard())
    }

    /// Reads the file into the document. A missing file yields the current
    /// document; an unparsable one is quarantined.
    pub fn load(&self) -> Result<AppConfig, StorageError> {
        let mut document = self.document_guard();
        if !self.inner.path.exists() {
            debug!("no configuration at {}, serving defaults", self.inner.path);
            return Ok(document.clone());
        }

        let bytes = fs::read(&self.inner.path)?;
        match decode_config(&bytes) {
            Ok(config) => {
                *document = config.clone();
                Ok(config)
            }
            Err(StorageError::Serde(e)) => {
                debug!("failed to parse {}: {e}", self.inner.path);
                let quarantined = quarantine_corrupt_file(&self.inner.path)?;
                Err(StorageError::Corrupt {
                    path: self.inner.path.clone(),
                    quarantined,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Stamps `last_saved` and writes the document atomically.
    pub fn save(&self) -> Result<Utf8PathBuf, StorageError> {
        let mut document = self.document_guard();
        if let Some(parent) = self.inner.path.parent().filter(|p| !p.as_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut stamped = document.clone();
        stamped.last_saved = Some(Utc::now());
        atomic_write(&self.inner.path, &encode_config(&stamped)?)?;
        *document = stamped;

        info!("configuration written to {}", self.inner.path);
        Ok(self.inner.path.clone())
    }

    /// Copies the saved file into the backup directory.
    pub fn backup(&self) -> Result<Utf8PathBuf, StorageError> {
        let _document = self.document_guard();
        // Nothing saved yet is reported rather than treated as an empty backup.
        if !self.inner.path.exists() {
            return Err(StorageError::Missing(self.inner.path.clone()));
        }

        let target = backup_path(&self.inner.path, &unique_stamp());
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::copy(&self.inner.path, &target)?;

        info!("configuration backed up to {target}");
        Ok(target)
    }

    fn dispatch(&self, command: &str) -> Result<Value, StorageError> {
        match command {
            ipc::LOAD_CONFIG => Ok(serde_json::to_value(self.load()?)?),
            ipc::SAVE_CONFIG => Ok(Value::String(self.save()?.into_string())),
            ipc::GET_CONFIG_PATH => Ok(Value::String(self.inner.path.to_string())),
            ipc::BACKUP_CONFIG => self.backup().map(|_| Value::Null),
            other => Err(StorageError::UnknownCommand(other.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl Invoke for JsonFileBackend {
    async fn invoke(&self, command: &str, _args: Option<Value>) -> Result<Value, BackendError> {
        debug!(command, "backend command");
        let backend = self.clone();
        let command = command.to_string();
        let reply = tokio::task::spawn_blocking(move || backend.dispatch(&command))
            .await
            .map_err(|e| BackendError::new(format!("backend task failed: {e}")))?;
        Ok(reply?)
    }
}
