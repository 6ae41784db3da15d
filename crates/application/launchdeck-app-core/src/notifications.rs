use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ports::NotificationSink;
use crate::sync::lock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            duration_ms: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

/// A notification currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveNotification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub duration_ms: u64,
}

/// In-memory notification list with self-expiring entries.
///
/// Expiry timers run on the ambient tokio runtime. Outside a runtime entries stay
/// until [`NotificationCenter::dismiss`] is called.
#[derive(Clone, Default)]
pub struct NotificationCenter {
    entries: Arc<Mutex<Vec<ActiveNotification>>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, notification: Notification) -> Uuid {
        let id = Uuid::new_v4();
        let duration_ms = notification
            .duration_ms
            .unwrap_or(launchdeck_config::DEFAULT_NOTIFICATION_DURATION_MS);

        lock(&self.entries).push(ActiveNotification {
            id,
            kind: notification.kind,
            message: notification.message,
            duration_ms,
        });

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let center = self.clone();
            handle.spawn(async move {
                tokio::time::sleep(Duration::from_millis(duration_ms)).await;
                center.dismiss(id);
            });
        }

        id
    }

    pub fn active(&self) -> Vec<ActiveNotification> {
        lock(&self.entries).clone()
    }

    /// Returns false if the entry had already expired or been dismissed.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let mut entries = lock(&self.entries);
        let before = entries.len();
        entries.retain(|n| n.id != id);
        entries.len() != before
    }
}

impl NotificationSink for NotificationCenter {
    fn emit(&self, notification: Notification) {
        self.push(notification);
    }
}
