//! In-memory domain stores the orchestrator hydrates.

mod groups;
mod launch_items;
mod settings;
mod versioned;

use std::sync::Arc;

pub use groups::GroupsStore;
pub use launch_items::LaunchItemsStore;
pub use settings::SettingsStore;
pub use versioned::StaleVersion;

use crate::ports::HydrationTargets;

/// The three stores, constructed together and shared by handle.
#[derive(Clone, Default)]
pub struct DomainStores {
    pub groups: Arc<GroupsStore>,
    pub launch_items: Arc<LaunchItemsStore>,
    pub settings: Arc<SettingsStore>,
}

impl DomainStores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hydration_targets(&self) -> HydrationTargets {
        HydrationTargets::new(
            self.groups.clone(),
            self.launch_items.clone(),
            self.settings.clone(),
        )
    }
}
