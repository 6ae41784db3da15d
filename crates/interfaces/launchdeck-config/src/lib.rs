//! Central configuration constants for runtime limits and defaults.

/// Auto-save cadence used when the caller does not pick one (minutes).
pub const DEFAULT_AUTO_SAVE_MINUTES: u32 = 5;

/// Shortest allowed auto-save cadence (minutes).
pub const MIN_AUTO_SAVE_MINUTES: u32 = 1;

/// Longest allowed auto-save cadence (minutes). One day.
pub const MAX_AUTO_SAVE_MINUTES: u32 = 24 * 60;

/// How long a notification stays visible when the emitter gives no duration.
pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 3000;

/// Default main window size.
pub const DEFAULT_WINDOW_WIDTH: u32 = 1200;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 800;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Convenience function to clamp an auto-save interval into the allowed range.
pub fn clamp_auto_save_minutes(v: u32) -> u32 {
    v.clamp(MIN_AUTO_SAVE_MINUTES, MAX_AUTO_SAVE_MINUTES)
}
