use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub mod decode;
pub mod ipc;
pub mod ordering;

pub use decode::DecodeError;
pub use ipc::{BackendError, Invoke};

pub type Timestamp = DateTime<Utc>;
pub type GroupId = String;
pub type LaunchItemId = String;

/// The unit of persistence: everything the backend stores in one config blob.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub groups: Vec<Group>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub launch_items: Vec<LaunchItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: AppSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<Timestamp>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Group {
    pub fn new(id: impl Into<GroupId>, name: impl Into<String>, order: i64) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            icon: None,
            color: None,
            order,
            expanded: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Groups without an explicit flag render expanded.
    pub fn is_expanded(&self) -> bool {
        self.expanded.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaunchItem {
    pub id: LaunchItemId,
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<String>,
    /// Soft reference; the group may not exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    pub order: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl LaunchItem {
    pub fn new(
        id: impl Into<LaunchItemId>,
        name: impl Into<String>,
        path: impl Into<String>,
        order: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            path: path.into(),
            args: None,
            working_dir: None,
            icon: None,
            shortcut: None,
            group_id: None,
            order,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn belongs_to(&self, group_id: &str) -> bool {
        self.group_id.as_deref() == Some(group_id)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub theme: Theme,
    pub auto_save: bool,
    pub show_notifications: bool,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            auto_save: true,
            show_notifications: true,
            window_width: launchdeck_config::DEFAULT_WINDOW_WIDTH,
            window_height: launchdeck_config::DEFAULT_WINDOW_HEIGHT,
        }
    }
}

/// Treats an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
