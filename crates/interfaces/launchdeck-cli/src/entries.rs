use anyhow::{anyhow, Result};
use launchdeck_core::{Group, LaunchItem};
use launchdeck_persistence::JsonFileBackend;

pub struct NewGroup {
    pub id: String,
    pub name: String,
    pub order: Option<i64>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

pub struct NewItem {
    pub id: String,
    pub name: String,
    pub path: String,
    pub args: Vec<String>,
    pub working_dir: Option<String>,
    pub group: Option<String>,
    pub order: Option<i64>,
}

pub fn validate_id(kind: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(anyhow!("{kind} ID cannot be empty"));
    }
    if !id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(anyhow!("{kind} ID must use only a-z, 0-9, - and _"));
    }
    Ok(())
}

/// Adds a group to the backend document. New groups go last unless an order is given.
pub fn add_group(backend: &JsonFileBackend, new: NewGroup) -> Result<Group> {
    validate_id("Group", &new.id)?;
    backend.update(|doc| {
        if doc.groups.iter().any(|g| g.id == new.id) {
            return Err(anyhow!("A group with ID '{}' already exists", new.id));
        }
        let order = new
            .order
            .unwrap_or_else(|| next_order(doc.groups.iter().map(|g| g.order)));
        let mut group = Group::new(new.id, new.name, order);
        group.color = new.color;
        group.icon = new.icon;
        doc.groups.push(group.clone());
        Ok(group)
    })
}

/// Adds a launch item. The group reference is stored as given, even if unknown.
pub fn add_item(backend: &JsonFileBackend, new: NewItem) -> Result<LaunchItem> {
    validate_id("Item", &new.id)?;
    backend.update(|doc| {
        if doc.launch_items.iter().any(|i| i.id == new.id) {
            return Err(anyhow!("An item with ID '{}' already exists", new.id));
        }
        let siblings = doc
            .launch_items
            .iter()
            .filter(|i| i.group_id == new.group)
            .map(|i| i.order);
        let order = new.order.unwrap_or_else(|| next_order(siblings));
        let mut item = LaunchItem::new(new.id, new.name, new.path, order);
        item.args = (!new.args.is_empty()).then_some(new.args);
        item.working_dir = new.working_dir;
        item.group_id = new.group;
        doc.launch_items.push(item.clone());
        Ok(item)
    })
}

fn next_order(existing: impl Iterator<Item = i64>) -> i64 {
    existing.max().map_or(0, |max| max + 1)
}
