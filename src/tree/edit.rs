//! Namespace orchestrator: rename, move, merge, delete and reload.

use crate::error::{NamespaceError, Outcome, Status};
use crate::events::ChangeKind;
use crate::tree::names::{fix_name, increment_duplicate, split_directories};
use crate::tree::node::{PathNode, WritableNode};
use crate::tree::FileSystem;
use crate::types::{NodeId, SEPARATOR};
use tracing::debug;

impl<T> FileSystem<T> {
    /// Rename `id`, failing if a sibling already uses the sanitized name.
    ///
    /// Renaming to the current name is a no-op that raises nothing.
    pub fn rename(&mut self, id: NodeId, new_name: &str) -> Result<Outcome, NamespaceError> {
        self.require_movable(id, "renamed")?;
        let name = fix_name(new_name);
        let result = match self.rename_internal(id, &name) {
            Status::Success => Ok(Outcome::Done),
            Status::SuccessNothingDone => Ok(Outcome::Unchanged),
            _ => Err(NamespaceError::NameCollision {
                parent: self.parent_path(id),
                name,
            }),
        };
        self.flush_events();
        result
    }

    /// Rename `id`, bumping a `" (N)"` suffix until the name is free.
    pub fn rename_with_duplicates(
        &mut self,
        id: NodeId,
        new_name: &str,
    ) -> Result<Outcome, NamespaceError> {
        self.require_movable(id, "renamed")?;
        let mut name = fix_name(new_name);
        let outcome = loop {
            match self.rename_internal(id, &name) {
                Status::ItemExists => name = increment_duplicate(&name),
                Status::SuccessNothingDone => break Outcome::Unchanged,
                _ => break Outcome::Done,
            }
        };
        self.flush_events();
        Ok(outcome)
    }

    /// Move `id` into `new_parent`.
    ///
    /// A same-named folder in the target turns a folder move into a merge;
    /// any other name collision fails.
    pub fn move_node(&mut self, id: NodeId, new_parent: NodeId) -> Result<Outcome, NamespaceError> {
        self.require_movable(id, "moved")?;
        self.require_folder(new_parent)?;

        let node = &self.nodes[&id];
        if node.parent == Some(new_parent) {
            return Ok(Outcome::Unchanged);
        }
        if let Ok(index) = self.search(new_parent, &node.name) {
            let existing = self.children_of(new_parent)[index];
            if node.is_folder() && self.nodes[&existing].is_folder() && existing != id {
                debug!(node = %id, into = %existing, "Move collides with folder; merging");
                return self.merge(id, existing);
            }
        }

        let previous = node.parent;
        let result = match self.move_internal(id, new_parent) {
            Status::Success => {
                debug!(node = %id, from = ?previous, to = %new_parent, "Node moved");
                self.emit(ChangeKind::ObjectMoved, id, previous, Some(new_parent));
                Ok(Outcome::Done)
            }
            Status::SuccessNothingDone => Ok(Outcome::Unchanged),
            Status::CircularReference => Err(NamespaceError::CircularReference {
                node: self.path_of(id),
                target: self.path_of(new_parent),
            }),
            _ => Err(NamespaceError::NameCollision {
                name: self.nodes[&id].name.clone(),
                parent: self.path_of(new_parent),
            }),
        };
        self.flush_events();
        result
    }

    /// Move and rename `id` so that its full path becomes `new_full_path`,
    /// creating missing folders on the way. Raises a single `ObjectMoved`.
    pub fn rename_and_move(
        &mut self,
        id: NodeId,
        new_full_path: &str,
    ) -> Result<Outcome, NamespaceError> {
        self.require_movable(id, "moved")?;
        let segments = split_directories(new_full_path);
        let Some((last, folders)) = segments.split_last() else {
            return Err(NamespaceError::EmptyPath);
        };
        let new_name = fix_name(last);
        let folder_path = folders.join(&SEPARATOR.to_string());

        // Any folder the walk might create would sit below the deepest
        // existing one, so checking that node is enough to rule out cycles.
        // A leaf on the path is reported by the walk as a blocked segment.
        if self.nodes[&id].is_folder() {
            let (_, reached) = self.find(&folder_path);
            if reached == id || self.is_descendant_of(reached, id) {
                return Err(NamespaceError::CircularReference {
                    node: self.path_of(id),
                    target: folder_path,
                });
            }
        }

        let target = match self.create_folder_chain(NodeId::ROOT, &folder_path) {
            Ok(target) => target,
            Err(err) => {
                self.flush_events();
                return Err(err);
            }
        };

        let previous = self.nodes[&id].parent;
        let result = if previous == Some(target) && self.nodes[&id].name == new_name {
            Ok(Outcome::Unchanged)
        } else {
            match self.search(target, &new_name) {
                Ok(index) if self.children_of(target)[index] != id => {
                    Err(NamespaceError::NameCollision {
                        name: new_name,
                        parent: self.path_of(target),
                    })
                }
                _ => {
                    self.detach(id);
                    if let Some(node) = self.nodes.get_mut(&id) {
                        node.set_name(&new_name, false);
                    }
                    // The only possible collision was the node itself, now detached.
                    let _ = self.attach(target, id);
                    debug!(node = %id, path = %self.path_of(id), "Node renamed and moved");
                    self.emit(ChangeKind::ObjectMoved, id, previous, Some(target));
                    Ok(Outcome::Done)
                }
            }
        };
        self.flush_events();
        result
    }

    /// Remove `id` and its whole subtree.
    pub fn delete(&mut self, id: NodeId) -> Result<(), NamespaceError> {
        self.require_movable(id, "deleted")?;
        let path = self.path_of(id);
        let parent = self.nodes[&id].parent;
        self.detach(id);
        self.discard(id);
        debug!(node = %id, path = %path, "Node deleted");
        self.emit_with_path(ChangeKind::ObjectRemoved, id, path, parent, None);
        self.flush_events();
        Ok(())
    }

    /// Move every child of folder `from` into folder `to`.
    ///
    /// Same-named sub-folders are merged recursively under the same policy.
    /// If everything moved, `from` is removed (`Outcome::Merged`); if only
    /// some children were blocked by collisions, `from` keeps them
    /// (`Outcome::PartialMerge`); if nothing could move, the tree is left
    /// untouched and `NothingToMerge` is returned.
    pub fn merge(&mut self, from: NodeId, to: NodeId) -> Result<Outcome, NamespaceError> {
        self.require_movable(from, "merged")?;
        self.require_folder(from)?;
        self.require_folder(to)?;
        if from == to {
            return Ok(Outcome::Unchanged);
        }
        if self.is_descendant_of(to, from) {
            return Err(NamespaceError::CircularReference {
                node: self.path_of(from),
                target: self.path_of(to),
            });
        }

        let from_path = self.path_of(from);
        let result = match self.merge_internal(from, to) {
            Status::Success => Ok(Outcome::Merged),
            Status::PartialSuccess => Ok(Outcome::PartialMerge),
            _ => Err(NamespaceError::NothingToMerge {
                from: from_path,
                to: self.path_of(to),
            }),
        };
        self.flush_events();
        result
    }

    /// Rebuild the tree from scratch.
    ///
    /// Clears everything below Root, runs `build` with per-change
    /// notifications suppressed, then raises a single `Reload`.
    pub fn reload<F, R>(&mut self, build: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.clear_pending();
        self.clear();
        let was_suppressed = std::mem::replace(&mut self.suppress_events, true);
        let result = build(&mut *self);
        self.suppress_events = was_suppressed;
        self.clear_pending();
        debug!(nodes = self.len(), "Namespace reloaded");
        self.emit(ChangeKind::Reload, NodeId::ROOT, None, None);
        self.flush_events();
        result
    }

    // ---- primitives -------------------------------------------------------

    fn require_movable(&self, id: NodeId, action: &'static str) -> Result<(), NamespaceError> {
        if self.require_node(id)?.is_root() {
            return Err(NamespaceError::RootOperation(action));
        }
        Ok(())
    }

    fn parent_path(&self, id: NodeId) -> String {
        self.nodes[&id]
            .parent
            .map(|parent| self.path_of(parent))
            .unwrap_or_default()
    }

    /// Rename in place and restore sibling order. `name` is already sanitized.
    fn rename_internal(&mut self, id: NodeId, name: &str) -> Status {
        let node = &self.nodes[&id];
        if node.is_root() {
            return Status::InvalidOperation;
        }
        if node.name == name {
            return Status::SuccessNothingDone;
        }
        let Some(parent) = node.parent else {
            return Status::InvalidOperation;
        };
        let old_index = node.index;
        if let Ok(index) = self.search(parent, name) {
            if self.children_of(parent)[index] != id {
                return Status::ItemExists;
            }
        }

        if let Some(folder) = self.nodes.get_mut(&parent).and_then(|n| n.as_folder_mut()) {
            folder.children.remove(old_index);
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.set_name(name, false);
        }
        let new_index = self.search(parent, name).unwrap_or_else(|index| index);
        if let Some(folder) = self.nodes.get_mut(&parent).and_then(|n| n.as_folder_mut()) {
            folder.children.insert(new_index, id);
        }
        self.reindex(parent, old_index.min(new_index));
        // Same parent, so this returns without touching the subtree.
        self.update_depth(id);

        debug!(node = %id, name, "Node renamed");
        self.emit(ChangeKind::ObjectRenamed, id, Some(parent), Some(parent));
        Status::Success
    }

    /// Relocate `id` under `new_parent` without raising events.
    fn move_internal(&mut self, id: NodeId, new_parent: NodeId) -> Status {
        let node = &self.nodes[&id];
        if node.is_root() {
            return Status::InvalidOperation;
        }
        if node.parent == Some(new_parent) {
            return Status::SuccessNothingDone;
        }
        if new_parent == id || self.is_descendant_of(new_parent, id) {
            return Status::CircularReference;
        }
        if self.search(new_parent, &node.name).is_ok() {
            return Status::ItemExists;
        }
        self.detach(id);
        match self.attach(new_parent, id) {
            Ok(_) => Status::Success,
            Err(status) => status,
        }
    }

    fn merge_internal(&mut self, from: NodeId, to: NodeId) -> Status {
        let children = self.children_of(from).to_vec();
        let mut moved_any = false;

        for child in children {
            // Earlier steps may already have relocated or removed this child.
            if self.nodes.get(&child).and_then(|n| n.parent) != Some(from) {
                continue;
            }
            let name = self.nodes[&child].name.clone();
            match self.search(to, &name) {
                Err(_) => {
                    if self.move_internal(child, to) == Status::Success {
                        moved_any = true;
                    }
                }
                Ok(index) => {
                    let existing = self.children_of(to)[index];
                    let both_folders =
                        self.nodes[&child].is_folder() && self.nodes[&existing].is_folder();
                    if both_folders && existing != from && !self.is_descendant_of(existing, child)
                    {
                        match self.merge_internal(child, existing) {
                            Status::Success | Status::PartialSuccess => moved_any = true,
                            _ => {}
                        }
                    }
                }
            }
        }

        let previous = self.nodes[&from].parent;
        if self.children_of(from).is_empty() {
            let path = self.path_of(from);
            self.detach(from);
            self.discard(from);
            debug!(node = %from, path = %path, into = %to, "Folder merged");
            self.emit_with_path(ChangeKind::FolderMerged, from, path, previous, Some(to));
            Status::Success
        } else if moved_any {
            debug!(node = %from, into = %to, "Folder partially merged");
            self.emit(ChangeKind::PartialMerge, from, previous, Some(to));
            Status::PartialSuccess
        } else {
            Status::NoSuccess
        }
    }
}
