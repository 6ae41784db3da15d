mod common;

use std::sync::{Arc, Mutex};

use common::RecordingSink;
use launchdeck_app_core::{
    ConfigErrorKind, ConfigOrchestrator, ConfigService, DomainStores, Hydrate, NotificationKind,
    RemoteConfigService,
};
use launchdeck_core::{BackendError, Invoke, LaunchItem};
use serde_json::{json, Value};

/// Answers each command from a fixed table and records what was asked.
#[derive(Default)]
struct ScriptedBackend {
    replies: Vec<(&'static str, Result<Value, BackendError>)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    fn reply(mut self, command: &'static str, reply: Result<Value, BackendError>) -> Self {
        self.replies.push((command, reply));
        self
    }
}

#[async_trait::async_trait]
impl Invoke for ScriptedBackend {
    async fn invoke(&self, command: &str, _args: Option<Value>) -> Result<Value, BackendError> {
        self.calls.lock().unwrap().push(command.to_string());
        self.replies
            .iter()
            .find(|(name, _)| *name == command)
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| Err(BackendError::new(format!("unknown command {command}"))))
    }
}

fn orchestrator_over(backend: ScriptedBackend) -> (ConfigOrchestrator, DomainStores, RecordingSink) {
    let stores = DomainStores::new();
    let sink = RecordingSink::default();
    let orchestrator = ConfigOrchestrator::new(
        Arc::new(RemoteConfigService::new(backend)),
        stores.hydration_targets(),
        Arc::new(sink.clone()),
    );
    (orchestrator, stores, sink)
}

#[tokio::test]
async fn well_formed_reply_reaches_the_stores() {
    let backend = ScriptedBackend::default().reply(
        "load_config",
        Ok(json!({
            "groups": [],
            "launch_items": [{
                "id": "1",
                "name": "App",
                "path": "/bin/app",
                "order": 0,
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z"
            }],
            "settings": { "theme": "dark" },
            "last_saved": "2024-01-01T00:00:00Z"
        })),
    );
    let (orchestrator, stores, _sink) = orchestrator_over(backend);

    orchestrator.load().await.unwrap();
    assert_eq!(stores.launch_items.items()[0].path, "/bin/app");
    assert_eq!(
        orchestrator.last_saved().unwrap().to_rfc3339(),
        "2024-01-01T00:00:00+00:00"
    );
}

#[tokio::test]
async fn malformed_reply_is_a_decode_error_and_never_hydrates() {
    let backend = ScriptedBackend::default().reply(
        "load_config",
        Ok(json!({ "launch_items": [{ "id": 1, "name": null }] })),
    );
    let (orchestrator, stores, sink) = orchestrator_over(backend);
    stores
        .launch_items
        .replace_all(Some(vec![LaunchItem::new("keep", "Keep", "/bin/keep", 0)]));

    let err = orchestrator.load().await.unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Decode);
    assert_eq!(stores.launch_items.items()[0].id, "keep");
    assert!(!orchestrator.is_loading());

    let errors = sink.of_kind(NotificationKind::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("load_config"));
}

#[tokio::test]
async fn backend_rejection_stays_a_backend_error() {
    let backend = ScriptedBackend::default()
        .reply("save_config", Err(BackendError::new("disk full")));
    let (orchestrator, _stores, _sink) = orchestrator_over(backend);

    let err = orchestrator.save().await.unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Backend);
    assert_eq!(err.to_string(), "disk full");
}

#[tokio::test]
async fn each_operation_calls_its_own_command() {
    let backend = ScriptedBackend::default()
        .reply("save_config", Ok(json!("/cfg/config.json")))
        .reply("get_config_path", Ok(json!("/cfg/config.json")))
        .reply("backup_config", Ok(Value::Null));
    let service = RemoteConfigService::new(backend);

    assert_eq!(service.save_config().await.unwrap(), "/cfg/config.json");
    assert_eq!(service.get_config_path().await.unwrap(), "/cfg/config.json");
    service.backup_config().await.unwrap();

    let calls = service.backend().calls.lock().unwrap().clone();
    assert_eq!(calls, vec!["save_config", "get_config_path", "backup_config"]);
}

#[tokio::test]
async fn non_string_path_is_rejected() {
    let backend = ScriptedBackend::default().reply("get_config_path", Ok(json!({ "path": 1 })));
    let service = RemoteConfigService::new(backend);
    let err = service.get_config_path().await.unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Decode);
}
