use std::fs;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;

/// Timestamp plus a process-wide counter, unique even within one millisecond.
pub fn unique_stamp() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let ts = Utc::now().format("%Y%m%dT%H%M%S%.3f");
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{ts}-{n}")
}

/// Moves an unreadable file out of the way and returns where it went.
pub fn quarantine_corrupt_file(path: &Utf8Path) -> std::io::Result<Utf8PathBuf> {
    let pid = std::process::id();
    let new_name = format!(
        "{}.corrupt.{}.{pid}",
        path.file_name().unwrap_or("config.json"),
        unique_stamp()
    );
    let new_path = path.with_file_name(new_name);
    tracing::warn!("configuration invalid/corrupt, quarantining to {}", new_path);
    fs::rename(path, &new_path)?;
    Ok(new_path)
}

/// Writes through a temp file and renames it over `path`.
pub fn atomic_write(path: &Utf8Path, contents: &[u8]) -> std::io::Result<()> {
    let tmp_path = Utf8PathBuf::from(format!("{path}.tmp"));

    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);

    match fs::rename(&tmp_path, path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            fs::remove_file(path).ok();
            fs::rename(&tmp_path, path)?;
        }
        Err(e) => {
            fs::remove_file(&tmp_path).ok();
            return Err(e);
        }
    }

    if let Some(parent) = path.parent() {
        if let Ok(dir) = fs::File::open(parent) {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}
