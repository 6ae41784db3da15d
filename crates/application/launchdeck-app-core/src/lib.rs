mod autosave;
pub mod error;
pub mod notifications;
pub mod orchestrator;
pub mod ports;
pub mod remote;
pub mod stores;
mod sync;

pub use error::{ConfigError, ConfigErrorKind, Operation};
pub use notifications::{ActiveNotification, Notification, NotificationCenter, NotificationKind};
pub use orchestrator::{ConfigOrchestrator, OrchestratorState};
pub use ports::*;
pub use remote::RemoteConfigService;
pub use stores::{DomainStores, GroupsStore, LaunchItemsStore, SettingsStore, StaleVersion};
