use launchdeck_core::AppConfig;

use crate::StorageError;

pub fn encode_config(config: &AppConfig) -> Result<Vec<u8>, StorageError> {
    Ok(serde_json::to_vec_pretty(config)?)
}

pub fn decode_config(bytes: &[u8]) -> Result<AppConfig, StorageError> {
    Ok(serde_json::from_slice(bytes)?)
}
