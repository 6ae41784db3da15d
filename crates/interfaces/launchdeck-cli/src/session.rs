use std::sync::Arc;

use anyhow::Result;
use camino::Utf8PathBuf;
use launchdeck_app_core::{
    ConfigOrchestrator, DomainStores, Notification, NotificationKind, RemoteConfigService,
};
use launchdeck_persistence::JsonFileBackend;

/// Everything one CLI invocation needs: the file backend, the stores and the
/// orchestrator wired between them.
pub struct Session {
    pub backend: JsonFileBackend,
    pub stores: DomainStores,
    pub orchestrator: ConfigOrchestrator,
}

impl Session {
    /// Opens the config at `config`, or at the platform default location.
    pub fn open(config: Option<Utf8PathBuf>) -> Result<Self> {
        let backend = match config {
            Some(path) => JsonFileBackend::new(path),
            None => JsonFileBackend::at_default_location()?,
        };
        Ok(Self::with_backend(backend))
    }

    pub fn with_backend(backend: JsonFileBackend) -> Self {
        let stores = DomainStores::new();
        let orchestrator = ConfigOrchestrator::new(
            Arc::new(RemoteConfigService::new(backend.clone())),
            stores.hydration_targets(),
            Arc::new(print_notification),
        );
        Self {
            backend,
            stores,
            orchestrator,
        }
    }
}

fn print_notification(notification: Notification) {
    match notification.kind {
        NotificationKind::Error => eprintln!("!! {}", notification.message),
        NotificationKind::Warning => eprintln!(":: warning: {}", notification.message),
        NotificationKind::Success | NotificationKind::Info => {
            println!(":: {}", notification.message)
        }
    }
}
