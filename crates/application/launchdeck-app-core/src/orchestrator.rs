use std::sync::{Arc, Mutex};
use std::time::Duration;

use launchdeck_config::{clamp_auto_save_minutes, DEFAULT_AUTO_SAVE_MINUTES};
use launchdeck_core::{AppConfig, Timestamp};
use tracing::{debug, error, info, warn};

use crate::autosave::AutoSaveTimer;
use crate::error::{ConfigError, Operation};
use crate::notifications::Notification;
use crate::ports::{ConfigService, HydrationTargets, NotificationSink};
use crate::sync::lock;

/// Derived, in-memory view of the orchestrator. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrchestratorState {
    pub is_loading: bool,
    pub last_saved: Option<Timestamp>,
    pub config_path: Option<String>,
    pub auto_save_enabled: bool,
}

struct Shared {
    state: OrchestratorState,
    in_flight: Option<Operation>,
}

struct Inner {
    service: Arc<dyn ConfigService>,
    targets: HydrationTargets,
    sink: Arc<dyn NotificationSink>,
    shared: Mutex<Shared>,
    auto_save: Mutex<Option<AutoSaveTimer>>,
}

/// Sequences load/save/backup against the config service, hydrates the domain
/// stores and owns the auto-save schedule.
///
/// Load, save and backup share one in-flight slot: a second request while one is
/// running fails with [`ConfigError::Busy`]. Handles are cheap to clone; the
/// auto-save task stops once the last handle is dropped.
#[derive(Clone)]
pub struct ConfigOrchestrator {
    inner: Arc<Inner>,
}

/// Holds the in-flight slot; releasing it clears `is_loading` on every exit path.
struct OperationPermit<'a> {
    shared: &'a Mutex<Shared>,
}

impl Drop for OperationPermit<'_> {
    fn drop(&mut self) {
        let mut shared = lock(self.shared);
        shared.in_flight = None;
        shared.state.is_loading = false;
    }
}

impl ConfigOrchestrator {
    pub fn new(
        service: Arc<dyn ConfigService>,
        targets: HydrationTargets,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                service,
                targets,
                sink,
                shared: Mutex::new(Shared {
                    state: OrchestratorState::default(),
                    in_flight: None,
                }),
                auto_save: Mutex::new(None),
            }),
        }
    }

    pub fn state(&self) -> OrchestratorState {
        lock(&self.inner.shared).state.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.inner.shared).state.is_loading
    }

    pub fn last_saved(&self) -> Option<Timestamp> {
        lock(&self.inner.shared).state.last_saved
    }

    pub fn config_path(&self) -> Option<String> {
        lock(&self.inner.shared).state.config_path.clone()
    }

    pub fn is_auto_save_armed(&self) -> bool {
        lock(&self.inner.auto_save).is_some()
    }

    pub fn auto_save_interval(&self) -> Option<Duration> {
        lock(&self.inner.auto_save).as_ref().map(AutoSaveTimer::period)
    }

    fn begin(&self, op: Operation) -> Result<OperationPermit<'_>, ConfigError> {
        let mut shared = lock(&self.inner.shared);
        if let Some(in_flight) = shared.in_flight {
            warn!("Rejected {op}: {in_flight} already in progress");
            return Err(ConfigError::Busy {
                requested: op,
                in_flight,
            });
        }
        shared.in_flight = Some(op);
        if matches!(op, Operation::Load | Operation::Save) {
            shared.state.is_loading = true;
        }
        Ok(OperationPermit {
            shared: &self.inner.shared,
        })
    }

    fn notify(&self, notification: Notification) {
        self.inner.sink.emit(notification);
    }

    /// Loads the persisted configuration and replaces all three stores with it.
    ///
    /// The stores are fully hydrated before the success notification goes out.
    pub async fn load(&self) -> Result<AppConfig, ConfigError> {
        let _permit = self.begin(Operation::Load)?;

        match self.inner.service.load_config().await {
            Ok(config) => {
                self.inner.targets.hydrate(&config);
                lock(&self.inner.shared).state.last_saved = config.last_saved;
                info!(
                    groups = config.groups.len(),
                    launch_items = config.launch_items.len(),
                    "Configuration loaded"
                );
                self.notify(Notification::success("Configuration loaded successfully"));
                Ok(config)
            }
            Err(e) => {
                error!("Failed to load config: {e}");
                self.notify(Notification::error(format!(
                    "Failed to load configuration: {e}"
                )));
                Err(e)
            }
        }
    }

    /// Asks the backend to persist its state. Returns the path written.
    pub async fn save(&self) -> Result<String, ConfigError> {
        let _permit = self.begin(Operation::Save)?;

        match self.inner.service.save_config().await {
            Ok(path) => {
                {
                    let mut shared = lock(&self.inner.shared);
                    shared.state.config_path = Some(path.clone());
                    shared.state.last_saved = Some(chrono::Utc::now());
                }
                info!("Configuration saved to {path}");
                self.notify(Notification::success(format!(
                    "Configuration saved to: {path}"
                )));
                Ok(path)
            }
            Err(e) => {
                error!("Failed to save config: {e}");
                self.notify(Notification::error(format!(
                    "Failed to save configuration: {e}"
                )));
                Err(e)
            }
        }
    }

    /// Resolves and caches the config path. Emits no notification.
    pub async fn get_config_path(&self) -> Result<String, ConfigError> {
        match self.inner.service.get_config_path().await {
            Ok(path) => {
                lock(&self.inner.shared).state.config_path = Some(path.clone());
                Ok(path)
            }
            Err(e) => {
                error!("Failed to get config path: {e}");
                Err(e)
            }
        }
    }

    /// Asks the backend for a backup copy. Does not set `is_loading`, but still
    /// waits its turn behind load and save since all three touch the same file.
    pub async fn backup(&self) -> Result<(), ConfigError> {
        let _permit = self.begin(Operation::Backup)?;

        match self.inner.service.backup_config().await {
            Ok(()) => {
                info!("Configuration backup created");
                self.notify(Notification::success(
                    "Configuration backup created successfully",
                ));
                Ok(())
            }
            Err(e) => {
                error!("Failed to backup config: {e}");
                self.notify(Notification::error(format!("Failed to create backup: {e}")));
                Err(e)
            }
        }
    }

    /// Arms a recurring save every `interval_minutes`, replacing any existing schedule.
    ///
    /// The interval is clamped into the configured bounds. Requires a tokio runtime.
    pub fn enable_auto_save(&self, interval_minutes: u32) -> Result<(), ConfigError> {
        let handle =
            tokio::runtime::Handle::try_current().map_err(|_| ConfigError::NoRuntime)?;
        let minutes = clamp_auto_save_minutes(interval_minutes);
        let period = Duration::from_secs(u64::from(minutes) * 60);

        let weak = Arc::downgrade(&self.inner);
        let timer = AutoSaveTimer::arm(&handle, period, move || {
            let orchestrator = ConfigOrchestrator {
                inner: weak.upgrade()?,
            };
            Some(async move { orchestrator.auto_save_tick().await })
        });

        // The flag is written under the timer lock so it always matches the slot.
        let previous = {
            let mut slot = lock(&self.inner.auto_save);
            lock(&self.inner.shared).state.auto_save_enabled = true;
            slot.replace(timer)
        };
        // Dropping the previous timer cancels it.
        drop(previous);

        info!("Auto-save enabled with {minutes} minute interval");
        Ok(())
    }

    /// Stops future auto-save ticks. A save already running is left to finish.
    pub fn disable_auto_save(&self) {
        let previous = {
            let mut slot = lock(&self.inner.auto_save);
            lock(&self.inner.shared).state.auto_save_enabled = false;
            slot.take()
        };
        if previous.is_some() {
            info!("Auto-save disabled");
        }
    }

    async fn auto_save_tick(&self) {
        match self.save().await {
            Ok(_) => {}
            Err(ConfigError::Busy { in_flight, .. }) => {
                debug!("Auto-save skipped, {in_flight} in progress");
            }
            Err(e) => warn!("Auto-save failed: {e}"),
        }
    }

    /// Best-effort startup: resolve the path, load, then arm auto-save.
    ///
    /// Never fails. A step that fails is logged and skipped; the stores keep their
    /// defaults and auto-save is armed regardless.
    pub async fn initialize(&self) {
        debug!("Initializing configuration");

        if let Err(e) = self.get_config_path().await {
            warn!("Failed to resolve config path, continuing: {e}");
        }

        if let Err(e) = self.load().await {
            warn!("Failed to initialize config, using defaults: {e}");
        }

        if let Err(e) = self.enable_auto_save(DEFAULT_AUTO_SAVE_MINUTES) {
            warn!("Failed to enable auto-save: {e}");
        }
    }

    /// Application teardown: clears the auto-save timer.
    pub fn shutdown(&self) {
        self.disable_auto_save();
        debug!("Configuration orchestrator shut down");
    }
}
