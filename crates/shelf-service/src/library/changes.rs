//! Comparison of the current snapshot against the previous one.

use std::collections::HashSet;

use shelf_core::traits::{PurgeIgnore, PurgeRequest};
use shelf_entity::change::{CacheInstruction, TrashEvent};
use shelf_entity::resource::Resource;
use shelf_entity::snapshot::{Catalog, Snapshot};
use shelf_entity::tree::Adjacency;

/// Collects cache instructions while the trees are assembled.
///
/// [`visit`](Self::visit) is called once per tree node. Each node's
/// current and previous members are compared record by record; a member
/// is examined at most once per rebuild even if it has several parents.
#[derive(Debug)]
pub struct ChangeDetector<'a> {
    catalog: &'a Catalog,
    adjacency: &'a Adjacency,
    previous: Option<&'a Snapshot>,
    first_run: bool,
    examined: HashSet<String>,
    instructions: Vec<CacheInstruction>,
}

impl<'a> ChangeDetector<'a> {
    /// Create a detector for the current catalog and adjacency.
    pub fn new(
        catalog: &'a Catalog,
        adjacency: &'a Adjacency,
        previous: Option<&'a Snapshot>,
    ) -> Self {
        let first_run = previous.is_none_or(|p| p.adjacency.is_empty());
        Self {
            catalog,
            adjacency,
            previous,
            first_run,
            examined: HashSet::new(),
            instructions: Vec::new(),
        }
    }

    /// Compare the members of node `id`.
    pub fn visit(&mut self, id: &str) {
        let current = self.adjacency.get(id);
        let last = self.previous.and_then(|p| p.adjacency.get(id));

        let mut members: Vec<&str> = Vec::new();
        for entry in [current, last].into_iter().flatten() {
            for member in entry.members() {
                if !members.contains(&member) {
                    members.push(member);
                }
            }
        }

        for member in members {
            if self.examined.insert(member.to_string()) {
                self.compare(member);
            }
        }
    }

    /// Everything collected so far.
    pub fn into_instructions(self) -> Vec<CacheInstruction> {
        self.instructions
    }

    fn compare(&mut self, id: &str) {
        let new = self.catalog.get(id);
        let old = self.previous.and_then(|p| p.catalog.get(id));

        let new_trashed = is_trashed(new);
        let old_trashed = is_trashed(old);
        if !self.first_run && (new_trashed || old_trashed) {
            let (item, event) = match (old_trashed, new_trashed) {
                (true, false) => (new, TrashEvent::ItemAdded),
                (false, true) => (old, TrashEvent::ItemRemoved),
                _ => return,
            };
            if let Some(item) = item.filter(|r| r.has_site_path()) {
                self.push_purge(
                    PurgeRequest::new(site_path(item), item.modified_time)
                        .with_edit_email(event.as_str())
                        .ignoring(&[PurgeIgnore::Missing, PurgeIgnore::Modified]),
                );
            }
            return;
        }

        let Some(new) = new else {
            return;
        };

        if self
            .adjacency
            .get(&new.id)
            .is_some_and(|entry| entry.home.is_some())
        {
            return;
        }

        match old {
            Some(old) if old.path != new.path => {
                if old.has_site_path() && new.has_site_path() {
                    self.instructions.push(CacheInstruction::Redirect {
                        from: site_path(old),
                        to: site_path(new),
                        modified: new.modified_time,
                    });
                } else if new.has_site_path() {
                    self.push_purge(PurgeRequest::new(site_path(new), new.modified_time));
                }
            }
            _ => {
                if new.has_site_path() {
                    self.push_purge(PurgeRequest::new(site_path(new), new.modified_time));
                }
            }
        }
    }

    fn push_purge(&mut self, request: PurgeRequest) {
        self.instructions.push(CacheInstruction::Purge(request));
    }
}

fn is_trashed(resource: Option<&Resource>) -> bool {
    resource.is_none_or(|r| r.in_trash)
}

fn site_path(resource: &Resource) -> String {
    resource.path.clone().unwrap_or_default()
}
