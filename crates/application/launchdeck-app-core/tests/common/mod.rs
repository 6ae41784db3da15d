#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use launchdeck_app_core::{
    ConfigError, ConfigOrchestrator, ConfigService, DomainStores, Notification, NotificationKind,
    NotificationSink,
};
use launchdeck_core::{AppConfig, AppSettings, BackendError, LaunchItem, Theme};
use tokio::sync::Notify;

pub const SAVED_PATH: &str = "/home/test/.config/launchdeck/config.json";

#[derive(Default)]
struct FakeState {
    config: AppConfig,
    load_error: Option<String>,
    save_error: Option<String>,
    path_error: Option<String>,
    backup_error: Option<String>,
    load_gate: Option<Arc<Notify>>,
    save_gate: Option<Arc<Notify>>,
}

/// Scriptable config service. Clones share state so tests can re-script mid-run.
#[derive(Clone, Default)]
pub struct FakeService {
    state: Arc<Mutex<FakeState>>,
    pub load_calls: Arc<AtomicUsize>,
    pub save_calls: Arc<AtomicUsize>,
    pub path_calls: Arc<AtomicUsize>,
    pub backup_calls: Arc<AtomicUsize>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(self, config: AppConfig) -> Self {
        self.state.lock().unwrap().config = config;
        self
    }

    pub fn fail_load(&self, message: &str) {
        self.state.lock().unwrap().load_error = Some(message.into());
    }

    pub fn fail_save(&self, message: &str) {
        self.state.lock().unwrap().save_error = Some(message.into());
    }

    pub fn heal_save(&self) {
        self.state.lock().unwrap().save_error = None;
    }

    pub fn fail_path(&self, message: &str) {
        self.state.lock().unwrap().path_error = Some(message.into());
    }

    pub fn fail_backup(&self, message: &str) {
        self.state.lock().unwrap().backup_error = Some(message.into());
    }

    /// Blocks every `load_config` call until the returned handle is notified.
    pub fn gate_load(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state.lock().unwrap().load_gate = Some(gate.clone());
        gate
    }

    pub fn gate_save(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state.lock().unwrap().save_gate = Some(gate.clone());
        gate
    }

    pub fn saves(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn loads(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }
}

fn outcome<T>(error: &Option<String>, ok: T) -> Result<T, ConfigError> {
    match error {
        Some(message) => Err(BackendError::new(message.clone()).into()),
        None => Ok(ok),
    }
}

#[async_trait::async_trait]
impl ConfigService for FakeService {
    async fn load_config(&self) -> Result<AppConfig, ConfigError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.state.lock().unwrap().load_gate.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let state = self.state.lock().unwrap();
        outcome(&state.load_error, state.config.clone())
    }

    async fn save_config(&self) -> Result<String, ConfigError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.state.lock().unwrap().save_gate.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let state = self.state.lock().unwrap();
        outcome(&state.save_error, SAVED_PATH.to_string())
    }

    async fn get_config_path(&self) -> Result<String, ConfigError> {
        self.path_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        outcome(&state.path_error, SAVED_PATH.to_string())
    }

    async fn backup_config(&self) -> Result<(), ConfigError> {
        self.backup_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        outcome(&state.backup_error, ())
    }
}

#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<Notification> {
        self.events.lock().unwrap().clone()
    }

    pub fn of_kind(&self, kind: NotificationKind) -> Vec<Notification> {
        self.events()
            .into_iter()
            .filter(|n| n.kind == kind)
            .collect()
    }
}

impl NotificationSink for RecordingSink {
    fn emit(&self, notification: Notification) {
        self.events.lock().unwrap().push(notification);
    }
}

pub struct Harness {
    pub orchestrator: ConfigOrchestrator,
    pub service: FakeService,
    pub sink: RecordingSink,
    pub stores: DomainStores,
}

pub fn harness(service: FakeService) -> Harness {
    let stores = DomainStores::new();
    let sink = RecordingSink::default();
    let orchestrator = ConfigOrchestrator::new(
        Arc::new(service.clone()),
        stores.hydration_targets(),
        Arc::new(sink.clone()),
    );
    Harness {
        orchestrator,
        service,
        sink,
        stores,
    }
}

pub fn ts(raw: &str) -> launchdeck_core::Timestamp {
    raw.parse().unwrap()
}

/// One launch item, no groups, dark theme, saved at the start of 2024.
pub fn sample_config() -> AppConfig {
    let created = ts("2023-12-31T12:00:00Z");
    AppConfig {
        groups: vec![],
        launch_items: vec![LaunchItem {
            created_at: created,
            updated_at: created,
            ..LaunchItem::new("1", "App", "/bin/app", 0)
        }],
        settings: AppSettings {
            theme: Theme::Dark,
            ..AppSettings::default()
        },
        last_saved: Some(ts("2024-01-01T00:00:00Z")),
    }
}

/// Lets spawned tasks run until `cond` holds.
pub async fn until(mut cond: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if cond() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}
