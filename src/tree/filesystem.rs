//! Namespace orchestrator: state, lookup and creation.
//!
//! `FileSystem<T>` owns every node in an arena keyed by [`NodeId`]. A folder
//! owns its children through its sorted `Vec<NodeId>`; a child's `parent` is
//! a lookup reference only. Structural primitives (`attach`, `detach`,
//! `update_depth`, …) live here and report [`Status`] codes; the public
//! operations translate those into [`NamespaceError`]s.

use crate::config::NamespaceConfig;
use crate::error::{NamespaceError, Status};
use crate::events::{ChangeEvent, ChangeHandler, ChangeKind, Observers, SubscriptionId};
use crate::tree::comparer::{CaseInsensitiveOrdinal, SiblingComparer};
use crate::tree::names::{fix_name, obtain_unique_string, split_directories};
use crate::tree::node::{Folder, Leaf, Node, NodeKind, PathNode, WritableNode};
use crate::tree::sort::SortMode;
use crate::tree::view::NodeRef;
use crate::types::{NodeId, DEFAULT_MAX_DUPLICATES};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Generic folder/leaf namespace.
pub struct FileSystem<T> {
    pub(crate) nodes: HashMap<NodeId, Node<T>>,
    next_id: u64,
    comparer: Box<dyn SiblingComparer>,
    pub(crate) max_duplicates: usize,
    observers: Observers<T>,
    pending: Vec<ChangeEvent>,
    pub(crate) suppress_events: bool,
}

impl<T> Default for FileSystem<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FileSystem<T> {
    /// Create an empty namespace ordered case-insensitively.
    pub fn new() -> Self {
        Self::with_comparer(Box::new(CaseInsensitiveOrdinal))
    }

    pub fn with_comparer(comparer: Box<dyn SiblingComparer>) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(NodeId::ROOT, Node::root());
        Self {
            nodes,
            next_id: 1,
            comparer,
            max_duplicates: DEFAULT_MAX_DUPLICATES,
            observers: Observers::new(),
            pending: Vec::new(),
            suppress_events: false,
        }
    }

    pub fn with_config(config: &NamespaceConfig) -> Self {
        let mut fs = Self::with_comparer(config.comparer.build());
        fs.max_duplicates = config.max_duplicates;
        fs
    }

    pub fn root(&self) -> NodeRef<'_, T> {
        NodeRef {
            fs: self,
            node: &self.nodes[&NodeId::ROOT],
        }
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        self.nodes.get(&id).map(|node| NodeRef { fs: self, node })
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Mutable access to a leaf's payload. Never changes structure.
    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(&id).and_then(Node::value_mut)
    }

    /// Number of nodes, Root excluded.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn full_name(&self, id: NodeId) -> Option<String> {
        self.get(id).map(|node| node.full_name())
    }

    /// Register a change handler.
    pub fn subscribe(&mut self, handler: ChangeHandler<T>) -> SubscriptionId {
        self.observers.add(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(id)
    }

    /// Resolve `path` from Root.
    ///
    /// Returns whether the whole path resolved, together with the deepest
    /// node reached. Resolution stops at the last folder when a segment is
    /// missing, and at a leaf when segments remain after it.
    pub fn find(&self, path: &str) -> (bool, NodeId) {
        let mut current = NodeId::ROOT;
        for segment in split_directories(path) {
            let node = &self.nodes[&current];
            if node.is_leaf() {
                trace!(path, stopped_at = %current, "Path descends into a leaf");
                return (false, current);
            }
            match self.search(current, segment) {
                Ok(index) => current = self.children_of(current)[index],
                Err(_) => {
                    trace!(path, stopped_at = %current, segment, "Path segment not found");
                    return (false, current);
                }
            }
        }
        (true, current)
    }

    /// `find` that only reports fully resolved paths.
    pub fn get_by_path(&self, path: &str) -> Option<NodeId> {
        match self.find(path) {
            (true, id) => Some(id),
            (false, _) => None,
        }
    }

    /// First leaf, in folders-first order, whose payload matches.
    pub fn find_leaf<P>(&self, mut predicate: P) -> Option<NodeId>
    where
        P: FnMut(&T) -> bool,
    {
        self.root()
            .descendants(SortMode::FoldersFirst)
            .find(|node| node.value().map(&mut predicate).unwrap_or(false))
            .map(|node| node.id())
    }

    /// Create a leaf under `parent`, failing if the sanitized name is taken.
    pub fn create_leaf(
        &mut self,
        parent: NodeId,
        name: &str,
        value: T,
    ) -> Result<(NodeId, usize), NamespaceError> {
        self.require_folder(parent)?;
        let name = fix_name(name);
        let index = self.free_slot(parent, &name)?;
        let id = self.allocate(name, NodeKind::Leaf(Leaf { value }));
        self.attach_at(parent, id, index);
        debug!(node = %id, parent = %parent, index, "Leaf created");
        self.emit(ChangeKind::LeafAdded, id, None, Some(parent));
        self.flush_events();
        Ok((id, index))
    }

    /// Create a leaf, appending `" (N)"` to the sanitized name until it is free.
    pub fn create_duplicate_leaf(
        &mut self,
        parent: NodeId,
        name: &str,
        value: T,
    ) -> Result<(NodeId, usize), NamespaceError> {
        self.require_folder(parent)?;
        let fixed = fix_name(name);
        let unique = obtain_unique_string(
            &fixed,
            |candidate| self.search(parent, candidate).is_ok(),
            self.max_duplicates,
        )
        .ok_or_else(|| NamespaceError::NoUniqueName(fixed.clone()))?;
        self.create_leaf(parent, &unique, value)
    }

    /// Create a folder under `parent`, failing if the sanitized name is taken.
    pub fn create_folder(
        &mut self,
        parent: NodeId,
        name: &str,
    ) -> Result<(NodeId, usize), NamespaceError> {
        self.require_folder(parent)?;
        let name = fix_name(name);
        let index = self.free_slot(parent, &name)?;
        let id = self.create_folder_at(parent, name, index);
        self.flush_events();
        Ok((id, index))
    }

    /// Return the same-named folder under `parent`, creating it if absent.
    pub fn find_or_create_folder(
        &mut self,
        parent: NodeId,
        name: &str,
    ) -> Result<(NodeId, usize), NamespaceError> {
        self.require_folder(parent)?;
        let name = fix_name(name);
        match self.search(parent, &name) {
            Ok(index) => {
                let existing = self.children_of(parent)[index];
                if self.nodes[&existing].is_folder() {
                    Ok((existing, index))
                } else {
                    Err(NamespaceError::WrongTypeCollision {
                        path: self.path_of(existing),
                    })
                }
            }
            Err(index) => {
                let id = self.create_folder_at(parent, name, index);
                self.flush_events();
                Ok((id, index))
            }
        }
    }

    /// Walk `path` from Root, creating every missing folder, and return the
    /// innermost folder.
    ///
    /// Folders created before a blocking non-folder segment are kept; the
    /// error names the deepest folder that was reached.
    pub fn find_or_create_all_folders(&mut self, path: &str) -> Result<NodeId, NamespaceError> {
        let result = self.create_folder_chain(NodeId::ROOT, path);
        self.flush_events();
        result
    }

    /// Set a folder's caller-defined flag. On a leaf this is a logged no-op.
    pub fn set_state(&mut self, id: NodeId, state: bool) -> Result<(), NamespaceError> {
        self.nodes
            .get_mut(&id)
            .ok_or(NamespaceError::NodeNotFound(id))?
            .set_state(state);
        Ok(())
    }

    pub fn toggle_state(&mut self, id: NodeId) -> Result<bool, NamespaceError> {
        let current = self
            .nodes
            .get(&id)
            .ok_or(NamespaceError::NodeNotFound(id))?
            .state();
        self.set_state(id, !current)?;
        Ok(self.nodes[&id].state())
    }

    /// Set the flag on `folder` and every folder below it.
    pub fn set_state_recursive(&mut self, folder: NodeId, state: bool) -> Result<(), NamespaceError> {
        self.require_folder(folder)?;
        let mut stack = vec![folder];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get_mut(&id) else {
                continue;
            };
            if let Some(f) = node.as_folder() {
                stack.extend(f.children.iter().copied());
                node.set_state(state);
            }
        }
        Ok(())
    }

    // ---- primitives -------------------------------------------------------

    pub(crate) fn compare(&self, a: &str, b: &str) -> Ordering {
        self.comparer.compare(a, b)
    }

    /// Children of a folder in storage order; empty for leaves.
    pub(crate) fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .and_then(Node::as_folder)
            .map(|f| f.children.as_slice())
            .unwrap_or(&[])
    }

    /// Binary search for `name` among `folder`'s children.
    pub(crate) fn search(&self, folder: NodeId, name: &str) -> Result<usize, usize> {
        self.children_of(folder)
            .binary_search_by(|child| self.compare(&self.nodes[child].name, name))
    }

    pub(crate) fn path_of(&self, id: NodeId) -> String {
        self.full_name(id).unwrap_or_default()
    }

    pub(crate) fn require_node(&self, id: NodeId) -> Result<&Node<T>, NamespaceError> {
        self.nodes.get(&id).ok_or(NamespaceError::NodeNotFound(id))
    }

    pub(crate) fn require_folder(&self, id: NodeId) -> Result<&Folder, NamespaceError> {
        self.require_node(id)?
            .as_folder()
            .ok_or_else(|| NamespaceError::NotAFolder(self.path_of(id)))
    }

    /// Insertion index for `name` under `parent`, or a collision error.
    fn free_slot(&self, parent: NodeId, name: &str) -> Result<usize, NamespaceError> {
        match self.search(parent, name) {
            Ok(_) => Err(NamespaceError::NameCollision {
                name: name.to_string(),
                parent: self.path_of(parent),
            }),
            Err(index) => Ok(index),
        }
    }

    /// Whether `node` lies strictly inside `ancestor`'s subtree.
    pub(crate) fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.nodes.get(&node).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn allocate(&mut self, name: String, kind: NodeKind<T>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, name, kind));
        id
    }

    fn create_folder_at(&mut self, parent: NodeId, name: String, index: usize) -> NodeId {
        let id = self.allocate(name, NodeKind::Folder(Folder::default()));
        self.attach_at(parent, id, index);
        debug!(node = %id, parent = %parent, index, "Folder created");
        self.emit(ChangeKind::FolderAdded, id, None, Some(parent));
        id
    }

    /// Walk/create each segment of `path` below `start`. Events are queued,
    /// not flushed.
    pub(crate) fn create_folder_chain(
        &mut self,
        start: NodeId,
        path: &str,
    ) -> Result<NodeId, NamespaceError> {
        let mut current = start;
        for segment in split_directories(path) {
            let name = fix_name(segment);
            match self.search(current, &name) {
                Ok(index) => {
                    let child = self.children_of(current)[index];
                    if !self.nodes[&child].is_folder() {
                        return Err(NamespaceError::FolderPathBlocked {
                            segment: name,
                            reached: current,
                            reached_path: self.path_of(current),
                        });
                    }
                    current = child;
                }
                Err(index) => current = self.create_folder_at(current, name, index),
            }
        }
        Ok(current)
    }

    /// Insert `child` into `parent` at its sorted position.
    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<usize, Status> {
        let name = self.nodes[&child].name.clone();
        match self.search(parent, &name) {
            Ok(_) => Err(Status::ItemExists),
            Err(index) => {
                self.attach_at(parent, child, index);
                Ok(index)
            }
        }
    }

    /// Insert `child` at a known-free sorted `index` of `parent`, then fix
    /// indices, depths and ancestor counters.
    pub(crate) fn attach_at(&mut self, parent: NodeId, child: NodeId, index: usize) {
        let weight = self.nodes[&child].subtree_weight();
        if let Some(folder) = self.nodes.get_mut(&parent).and_then(Node::as_folder_mut) {
            folder.children.insert(index, child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.set_parent(Some(parent));
        }
        self.reindex(parent, index);
        self.update_depth(child);
        self.adjust_counters(parent, weight, true);
    }

    /// Remove `child` from its parent, keeping it in the arena unattached.
    pub(crate) fn detach(&mut self, child: NodeId) -> Status {
        let (parent, index, weight) = match self.nodes.get(&child) {
            Some(node) => match node.parent {
                Some(parent) => (parent, node.index, node.subtree_weight()),
                None => return Status::InvalidOperation,
            },
            None => return Status::NoSuccess,
        };
        if let Some(folder) = self.nodes.get_mut(&parent).and_then(Node::as_folder_mut) {
            folder.children.remove(index);
        }
        self.reindex(parent, index);
        self.adjust_counters(parent, weight, false);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.set_parent(None);
        }
        Status::Success
    }

    /// Drop an unattached node and its whole subtree from the arena.
    pub(crate) fn discard(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                if let NodeKind::Folder(folder) = node.kind {
                    stack.extend(folder.children);
                }
            }
        }
    }

    /// Refresh `index` of every child of `folder` from position `from` on.
    pub(crate) fn reindex(&mut self, folder: NodeId, from: usize) {
        let children: Vec<NodeId> = self.children_of(folder).get(from..).unwrap_or(&[]).to_vec();
        for (offset, child) in children.into_iter().enumerate() {
            if let Some(node) = self.nodes.get_mut(&child) {
                node.set_index(from + offset);
            }
        }
    }

    /// Recompute depth from the parent; descend only when it actually changed.
    pub(crate) fn update_depth(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let parent_depth = match self.nodes[&current].parent {
                Some(parent) => self.nodes[&parent].depth,
                None => continue,
            };
            let Some(node) = self.nodes.get_mut(&current) else {
                continue;
            };
            if node.set_depth(parent_depth.wrapping_add(1)) {
                if let Some(folder) = node.as_folder() {
                    stack.extend(folder.children.iter().copied());
                }
            }
        }
    }

    /// Add or subtract a subtree weight on `start` and every ancestor.
    fn adjust_counters(&mut self, start: NodeId, (descendants, leaves): (usize, usize), add: bool) {
        let mut current = Some(start);
        while let Some(id) = current {
            let Some(node) = self.nodes.get_mut(&id) else {
                break;
            };
            if let Some(folder) = node.as_folder_mut() {
                if add {
                    folder.total_descendants += descendants;
                    folder.total_leaves += leaves;
                } else {
                    folder.total_descendants -= descendants;
                    folder.total_leaves -= leaves;
                }
            }
            current = node.parent;
        }
    }

    // ---- notifications ----------------------------------------------------

    /// Queue an event; its path is taken from the node's current position.
    pub(crate) fn emit(
        &mut self,
        kind: ChangeKind,
        node: NodeId,
        previous_parent: Option<NodeId>,
        new_parent: Option<NodeId>,
    ) {
        let path = self.path_of(node);
        self.emit_with_path(kind, node, path, previous_parent, new_parent);
    }

    pub(crate) fn emit_with_path(
        &mut self,
        kind: ChangeKind,
        node: NodeId,
        path: String,
        previous_parent: Option<NodeId>,
        new_parent: Option<NodeId>,
    ) {
        if self.suppress_events {
            return;
        }
        self.pending.push(ChangeEvent {
            kind,
            node,
            path,
            previous_parent,
            new_parent,
        });
    }

    /// Deliver queued events to every handler, in order.
    pub(crate) fn flush_events(&mut self) {
        if self.suppress_events || self.pending.is_empty() {
            return;
        }
        let events = std::mem::take(&mut self.pending);
        let mut handlers = std::mem::take(&mut self.observers.handlers);
        for event in &events {
            for (_, handler) in handlers.iter_mut() {
                handler(&*self, event);
            }
        }
        self.observers.handlers = handlers;
    }

    pub(crate) fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Reset to an empty Root. Identifiers keep counting up.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.insert(NodeId::ROOT, Node::root());
    }
}
