use std::sync::Arc;

use launchdeck_core::{AppConfig, AppSettings, Group, LaunchItem};

use crate::error::ConfigError;
use crate::notifications::Notification;

/// The durable source of truth. The backend owns serialization of its own state.
#[async_trait::async_trait]
pub trait ConfigService: Send + Sync + 'static {
    async fn load_config(&self) -> Result<AppConfig, ConfigError>;
    /// Persists backend state and returns the path written.
    async fn save_config(&self) -> Result<String, ConfigError>;
    async fn get_config_path(&self) -> Result<String, ConfigError>;
    async fn backup_config(&self) -> Result<(), ConfigError>;
}

/// Full, synchronous replacement of a store's contents. `None` means empty/default.
pub trait Hydrate<T>: Send + Sync + 'static {
    fn replace_all(&self, data: Option<T>);
}

/// Fire-and-forget user notifications. Display and expiry belong to the sink.
pub trait NotificationSink: Send + Sync + 'static {
    fn emit(&self, notification: Notification);
}

impl<F> NotificationSink for F
where
    F: Fn(Notification) + Send + Sync + 'static,
{
    fn emit(&self, notification: Notification) {
        self(notification)
    }
}

/// The three stores the orchestrator fans a loaded config out to.
#[derive(Clone)]
pub struct HydrationTargets {
    pub groups: Arc<dyn Hydrate<Vec<Group>>>,
    pub launch_items: Arc<dyn Hydrate<Vec<LaunchItem>>>,
    pub settings: Arc<dyn Hydrate<AppSettings>>,
}

impl HydrationTargets {
    pub fn new(
        groups: Arc<dyn Hydrate<Vec<Group>>>,
        launch_items: Arc<dyn Hydrate<Vec<LaunchItem>>>,
        settings: Arc<dyn Hydrate<AppSettings>>,
    ) -> Self {
        Self {
            groups,
            launch_items,
            settings,
        }
    }

    pub(crate) fn hydrate(&self, config: &AppConfig) {
        self.groups.replace_all(Some(config.groups.clone()));
        self.launch_items
            .replace_all(Some(config.launch_items.clone()));
        self.settings.replace_all(Some(config.settings.clone()));
    }
}
