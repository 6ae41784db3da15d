mod common;

use common::{harness, sample_config, ts, FakeService, SAVED_PATH};
use launchdeck_app_core::{ConfigErrorKind, Hydrate, NotificationKind};
use launchdeck_core::{Group, LaunchItem, Theme};

#[tokio::test]
async fn load_hydrates_every_store_with_exactly_the_loaded_slices() {
    let h = harness(FakeService::new().with_config(sample_config()));

    // Pre-existing state that a merge would keep around.
    h.stores.groups.upsert(Group::new("stale", "Stale", 0));
    h.stores
        .launch_items
        .upsert(LaunchItem::new("stale", "Stale", "/bin/stale", 5));

    let config = h.orchestrator.load().await.unwrap();
    assert_eq!(config, sample_config());

    assert!(h.stores.groups.groups().is_empty());
    let items = h.stores.launch_items.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "1");
    assert_eq!(h.stores.settings.settings().theme, Theme::Dark);

    assert_eq!(h.orchestrator.last_saved(), Some(ts("2024-01-01T00:00:00Z")));
    assert!(!h.orchestrator.is_loading());

    let events = h.sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, NotificationKind::Success);
    assert_eq!(events[0].message, "Configuration loaded successfully");
}

#[tokio::test]
async fn stores_are_hydrated_before_the_success_notification() {
    let h = harness(FakeService::new().with_config(sample_config()));
    let items = h.stores.launch_items.clone();
    let seen = std::sync::Arc::new(std::sync::Mutex::new(None));
    let seen_in_sink = seen.clone();

    let orchestrator = launchdeck_app_core::ConfigOrchestrator::new(
        std::sync::Arc::new(h.service.clone()),
        h.stores.hydration_targets(),
        std::sync::Arc::new(move |_n: launchdeck_app_core::Notification| {
            *seen_in_sink.lock().unwrap() = Some(items.len());
        }),
    );

    orchestrator.load().await.unwrap();
    assert_eq!(*seen.lock().unwrap(), Some(1));
}

#[tokio::test]
async fn failed_load_notifies_reraises_and_leaves_stores_alone() {
    let h = harness(FakeService::new());
    h.stores
        .launch_items
        .replace_all(Some(vec![LaunchItem::new("keep", "Keep", "/bin/keep", 0)]));
    h.service.fail_load("permission denied");

    let err = h.orchestrator.load().await.unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Backend);
    assert_eq!(err.to_string(), "permission denied");

    assert!(!h.orchestrator.is_loading());
    assert!(h.orchestrator.last_saved().is_none());
    assert_eq!(h.stores.launch_items.len(), 1);

    let errors = h.sink.of_kind(NotificationKind::Error);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].message,
        "Failed to load configuration: permission denied"
    );
}

#[tokio::test]
async fn save_records_path_and_timestamp() {
    let h = harness(FakeService::new());
    let before = chrono::Utc::now();

    let path = h.orchestrator.save().await.unwrap();
    assert_eq!(path, SAVED_PATH);

    let state = h.orchestrator.state();
    assert_eq!(state.config_path.as_deref(), Some(SAVED_PATH));
    assert!(state.last_saved.unwrap() >= before);
    assert!(!state.is_loading);

    let events = h.sink.of_kind(NotificationKind::Success);
    assert_eq!(events.len(), 1);
    assert!(events[0].message.contains(SAVED_PATH));
}

#[tokio::test]
async fn save_rejected_with_disk_full() {
    let h = harness(FakeService::new());
    h.service.fail_save("disk full");

    let err = h.orchestrator.save().await.unwrap_err();
    assert!(err.to_string().contains("disk full"));
    assert!(!h.orchestrator.is_loading());
    assert!(h.orchestrator.config_path().is_none());

    let events = h.sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, NotificationKind::Error);
    assert!(events[0].message.contains("disk full"));
}

#[tokio::test]
async fn config_path_is_cached_without_notifications() {
    let h = harness(FakeService::new());
    assert_eq!(h.orchestrator.get_config_path().await.unwrap(), SAVED_PATH);
    assert_eq!(h.orchestrator.config_path().as_deref(), Some(SAVED_PATH));

    h.service.fail_path("no home directory");
    assert!(h.orchestrator.get_config_path().await.is_err());
    assert_eq!(h.orchestrator.config_path().as_deref(), Some(SAVED_PATH));

    assert!(h.sink.events().is_empty());
}

#[tokio::test]
async fn backup_notifies_on_both_outcomes_without_touching_is_loading() {
    let h = harness(FakeService::new());

    h.orchestrator.backup().await.unwrap();
    h.service.fail_backup("read-only file system");
    let err = h.orchestrator.backup().await.unwrap_err();
    assert!(err.to_string().contains("read-only"));

    let events = h.sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, NotificationKind::Success);
    assert_eq!(events[0].message, "Configuration backup created successfully");
    assert_eq!(events[1].kind, NotificationKind::Error);
    assert_eq!(
        events[1].message,
        "Failed to create backup: read-only file system"
    );
    assert!(!h.orchestrator.is_loading());
}
