use launchdeck_core::ordering::sorted_by_order;
use launchdeck_core::{Group, GroupId};

use super::versioned::{StaleVersion, VersionedCell};
use crate::ports::Hydrate;

#[derive(Default)]
struct GroupsState {
    groups: Vec<Group>,
    selected_group_id: Option<GroupId>,
}

#[derive(Default)]
pub struct GroupsStore {
    cell: VersionedCell<GroupsState>,
}

impl GroupsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(&self) -> u64 {
        self.cell.version()
    }

    pub fn groups(&self) -> Vec<Group> {
        self.cell.read(|s| s.groups.clone())
    }

    pub fn sorted_groups(&self) -> Vec<Group> {
        self.cell.read(|s| sorted_by_order(&s.groups))
    }

    pub fn get(&self, id: &str) -> Option<Group> {
        self.cell
            .read(|s| s.groups.iter().find(|g| g.id == id).cloned())
    }

    pub fn select_group(&self, id: Option<GroupId>) {
        self.cell.update(|s| s.selected_group_id = id);
    }

    /// The selected group, if it still exists after the last hydration.
    pub fn selected_group(&self) -> Option<Group> {
        self.cell.read(|s| {
            let id = s.selected_group_id.as_deref()?;
            s.groups.iter().find(|g| g.id == id).cloned()
        })
    }

    pub fn upsert(&self, group: Group) {
        self.cell.update(|s| upsert_group(&mut s.groups, group));
    }

    /// Like [`GroupsStore::upsert`], but only if nothing replaced the store since `version`.
    pub fn upsert_if_unchanged(&self, version: u64, group: Group) -> Result<(), StaleVersion> {
        self.cell
            .update_if_version(version, |s| upsert_group(&mut s.groups, group))
    }

    pub fn remove(&self, id: &str) -> Option<Group> {
        self.cell.update(|s| {
            let ix = s.groups.iter().position(|g| g.id == id)?;
            if s.selected_group_id.as_deref() == Some(id) {
                s.selected_group_id = None;
            }
            Some(s.groups.remove(ix))
        })
    }

    /// Flips the expanded flag and returns the new value.
    pub fn toggle_expanded(&self, id: &str) -> Option<bool> {
        self.cell.update(|s| {
            let group = s.groups.iter_mut().find(|g| g.id == id)?;
            let expanded = !group.is_expanded();
            group.expanded = Some(expanded);
            group.updated_at = chrono::Utc::now();
            Some(expanded)
        })
    }
}

fn upsert_group(groups: &mut Vec<Group>, group: Group) {
    match groups.iter_mut().find(|g| g.id == group.id) {
        Some(existing) => *existing = group,
        None => groups.push(group),
    }
}

impl Hydrate<Vec<Group>> for GroupsStore {
    fn replace_all(&self, data: Option<Vec<Group>>) {
        self.cell.update(|s| s.groups = data.unwrap_or_default());
    }
}
