use launchdeck_core::decode::{decode_config, decode_path, decode_unit};
use launchdeck_core::ipc::{self, Invoke};
use launchdeck_core::AppConfig;

use crate::error::ConfigError;
use crate::ports::ConfigService;

/// [`ConfigService`] over the backend's `invoke` channel. Every reply is decoded
/// into a typed value before it leaves this adapter.
pub struct RemoteConfigService<I> {
    backend: I,
}

impl<I: Invoke> RemoteConfigService<I> {
    pub fn new(backend: I) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &I {
        &self.backend
    }
}

#[async_trait::async_trait]
impl<I: Invoke> ConfigService for RemoteConfigService<I> {
    async fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let raw = self.backend.invoke(ipc::LOAD_CONFIG, None).await?;
        Ok(decode_config(ipc::LOAD_CONFIG, raw)?)
    }

    async fn save_config(&self) -> Result<String, ConfigError> {
        let raw = self.backend.invoke(ipc::SAVE_CONFIG, None).await?;
        Ok(decode_path(ipc::SAVE_CONFIG, raw)?)
    }

    async fn get_config_path(&self) -> Result<String, ConfigError> {
        let raw = self.backend.invoke(ipc::GET_CONFIG_PATH, None).await?;
        Ok(decode_path(ipc::GET_CONFIG_PATH, raw)?)
    }

    async fn backup_config(&self) -> Result<(), ConfigError> {
        let raw = self.backend.invoke(ipc::BACKUP_CONFIG, None).await?;
        Ok(decode_unit(ipc::BACKUP_CONFIG, raw)?)
    }
}
