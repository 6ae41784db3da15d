use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;

use crate::StorageError;

const QUALIFIER: &str = "com";
const ORG: &str = "launchdeck";
const APP: &str = "launchdeck";

pub const BACKUP_DIR: &str = "backups";

/// `<platform config dir>/config.json`. The directory is not created here.
pub fn default_config_path() -> Result<Utf8PathBuf, StorageError> {
    let dirs = ProjectDirs::from(QUALIFIER, ORG, APP).ok_or(StorageError::NoConfigDir)?;
    let dir = Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf())
        .map_err(|p| StorageError::InvalidPath(p.to_string_lossy().into_owned()))?;
    Ok(dir.join(launchdeck_config::CONFIG_FILE_NAME))
}

/// `<dir>/backups/<stem>.<stamp>.json` next to the config file.
pub fn backup_path(config_path: &Utf8Path, stamp: &str) -> Utf8PathBuf {
    let dir = config_path
        .parent()
        .unwrap_or_else(|| Utf8Path::new("."))
        .join(BACKUP_DIR);
    let stem = config_path.file_stem().unwrap_or("config");
    dir.join(format!("{stem}.{stamp}.json"))
}
