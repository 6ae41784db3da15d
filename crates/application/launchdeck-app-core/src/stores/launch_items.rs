use launchdeck_core::ordering::sorted_by_order;
use launchdeck_core::{GroupId, LaunchItem};

use super::versioned::{StaleVersion, VersionedCell};
use crate::ports::Hydrate;

#[derive(Default)]
pub struct LaunchItemsStore {
    cell: VersionedCell<Vec<LaunchItem>>,
}

impl LaunchItemsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u64 {
        self.cell.version()
    }

    pub fn items(&self) -> Vec<LaunchItem> {
        self.cell.read(Vec::clone)
    }

    pub fn len(&self) -> usize {
        self.cell.read(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<LaunchItem> {
        self.cell
            .read(|items| items.iter().find(|i| i.id == id).cloned())
    }

    /// Items referencing `group_id`, in display order.
    pub fn items_by_group(&self, group_id: &str) -> Vec<LaunchItem> {
        self.cell.read(|items| {
            let matching: Vec<_> = items
                .iter()
                .filter(|i| i.belongs_to(group_id))
                .cloned()
                .collect();
            sorted_by_order(&matching)
        })
    }

    /// Items whose group is unset.
    pub fn ungrouped(&self) -> Vec<LaunchItem> {
        self.cell.read(|items| {
            let matching: Vec<_> = items
                .iter()
                .filter(|i| i.group_id.is_none())
                .cloned()
                .collect();
            sorted_by_order(&matching)
        })
    }

    pub fn upsert(&self, item: LaunchItem) {
        self.cell.update(|items| upsert_item(items, item));
    }

    pub fn upsert_if_unchanged(&self, version: u64, item: LaunchItem) -> Result<(), StaleVersion> {
        self.cell
            .update_if_version(version, |items| upsert_item(items, item))
    }

    pub fn remove(&self, id: &str) -> Option<LaunchItem> {
        self.cell.update(|items| {
            let ix = items.iter().position(|i| i.id == id)?;
            Some(items.remove(ix))
        })
    }

    /// Re-parents an item. The target group is not checked for existence.
    pub fn move_to_group(&self, id: &str, group_id: Option<GroupId>) -> Option<LaunchItem> {
        self.cell.update(|items| {
            let item = items.iter_mut().find(|i| i.id == id)?;
            item.group_id = group_id;
            item.updated_at = chrono::Utc::now();
            Some(item.clone())
        })
    }
}

fn upsert_item(items: &mut Vec<LaunchItem>, item: LaunchItem) {
    match items.iter_mut().find(|i| i.id == item.id) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

impl Hydrate<Vec<LaunchItem>> for LaunchItemsStore {
    fn replace_all(&self, data: Option<Vec<LaunchItem>>) {
        self.cell.update(|items| *items = data.unwrap_or_default());
    }
}
