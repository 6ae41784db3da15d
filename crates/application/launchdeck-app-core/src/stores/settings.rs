use launchdeck_core::{AppSettings, Theme};

use super::versioned::VersionedCell;
use crate::ports::Hydrate;

/// Holds the singleton settings value.
#[derive(Default)]
pub struct SettingsStore {
    cell: VersionedCell<AppSettings>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u64 {
        self.cell.version()
    }

    pub fn settings(&self) -> AppSettings {
        self.cell.read(AppSettings::clone)
    }

    pub fn update(&self, f: impl FnOnce(&mut AppSettings)) -> AppSettings {
        self.cell.update(|s| {
            f(s);
            s.clone()
        })
    }

    pub fn toggle_theme(&self) -> Theme {
        self.cell.update(|s| {
            s.theme = s.theme.toggled();
            s.theme
        })
    }
}

impl Hydrate<AppSettings> for SettingsStore {
    fn replace_all(&self, data: Option<AppSettings>) {
        self.cell.update(|s| *s = data.unwrap_or_default());
    }
}
