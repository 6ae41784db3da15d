mod codec;
mod error;
mod file_backend;
mod maintenance;
mod paths;

pub use error::*;
pub use file_backend::JsonFileBackend;
pub use paths::{backup_path, default_config_path, BACKUP_DIR};
