//! Folder and leaf node types.
//!
//! A node is a shared addressing header (name, parent, depth, index) plus a
//! variant body. Everyone outside the crate reads nodes through [`PathNode`];
//! the orchestrator alone mutates them through the crate-private
//! [`WritableNode`].

use crate::tree::names::fix_name;
use crate::types::{NodeId, ROOT_DEPTH};
use tracing::warn;

/// Read contract shared by folders and leaves.
pub trait PathNode {
    fn name(&self) -> &str;
    fn parent(&self) -> Option<NodeId>;
    fn identifier(&self) -> NodeId;
    fn depth(&self) -> u32;
    /// Position of this node within its parent's children.
    fn index(&self) -> usize;
    /// Caller-defined flag (e.g. expanded). Always `false` for leaves.
    fn state(&self) -> bool;

    fn is_root(&self) -> bool {
        self.depth() == ROOT_DEPTH
    }
}

/// Privileged mutations, only reachable from inside the crate.
pub(crate) trait WritableNode {
    fn set_parent(&mut self, parent: Option<NodeId>);
    fn set_name(&mut self, name: &str, fix: bool);
    /// Store a new depth, returning whether it differs from the old one.
    fn set_depth(&mut self, depth: u32) -> bool;
    fn set_index(&mut self, index: usize);
    fn set_state(&mut self, state: bool);
}

/// Internal node owning an ordered set of children.
#[derive(Debug, Clone, Default)]
pub struct Folder {
    pub(crate) children: Vec<NodeId>,
    pub(crate) total_descendants: usize,
    pub(crate) total_leaves: usize,
    pub(crate) state: bool,
}

impl Folder {
    /// Children in storage (comparer) order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn total_descendants(&self) -> usize {
        self.total_descendants
    }

    pub fn total_leaves(&self) -> usize {
        self.total_leaves
    }
}

/// Terminal node owning one payload value.
#[derive(Debug, Clone)]
pub struct Leaf<T> {
    pub(crate) value: T,
}

impl<T> Leaf<T> {
    pub fn value(&self) -> &T {
        &self.value
    }
}

/// Variant body of a node.
#[derive(Debug, Clone)]
pub enum NodeKind<T> {
    Folder(Folder),
    Leaf(Leaf<T>),
}

/// A namespace node: addressing header plus folder or leaf body.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: u32,
    pub(crate) index: usize,
    pub(crate) kind: NodeKind<T>,
}

impl<T> Node<T> {
    pub(crate) fn root() -> Self {
        Self {
            id: NodeId::ROOT,
            name: String::new(),
            parent: None,
            depth: ROOT_DEPTH,
            index: 0,
            kind: NodeKind::Folder(Folder::default()),
        }
    }

    /// Unattached node; the orchestrator sets parent, depth and index on insert.
    pub(crate) fn new(id: NodeId, name: String, kind: NodeKind<T>) -> Self {
        Self {
            id,
            name,
            parent: None,
            depth: 0,
            index: 0,
            kind,
        }
    }

    pub fn kind(&self) -> &NodeKind<T> {
        &self.kind
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match &self.kind {
            NodeKind::Folder(folder) => Some(folder),
            NodeKind::Leaf(_) => None,
        }
    }

    pub(crate) fn as_folder_mut(&mut self) -> Option<&mut Folder> {
        match &mut self.kind {
            NodeKind::Folder(folder) => Some(folder),
            NodeKind::Leaf(_) => None,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match &self.kind {
            NodeKind::Leaf(leaf) => Some(&leaf.value),
            NodeKind::Folder(_) => None,
        }
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut T> {
        match &mut self.kind {
            NodeKind::Leaf(leaf) => Some(&mut leaf.value),
            NodeKind::Folder(_) => None,
        }
    }

    /// Counter deltas this node contributes to each ancestor:
    /// `(descendants, leaves)` including the node itself.
    pub(crate) fn subtree_weight(&self) -> (usize, usize) {
        match &self.kind {
            NodeKind::Folder(folder) => (folder.total_descendants + 1, folder.total_leaves),
            NodeKind::Leaf(_) => (1, 1),
        }
    }
}

impl<T> PathNode for Node<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn identifier(&self) -> NodeId {
        self.id
    }

    fn depth(&self) -> u32 {
        self.depth
    }

    fn index(&self) -> usize {
        self.index
    }

    fn state(&self) -> bool {
        match &self.kind {
            NodeKind::Folder(folder) => folder.state,
            NodeKind::Leaf(_) => false,
        }
    }
}

impl<T> WritableNode for Node<T> {
    fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    fn set_name(&mut self, name: &str, fix: bool) {
        self.name = if fix { fix_name(name) } else { name.to_string() };
    }

    fn set_depth(&mut self, depth: u32) -> bool {
        if self.depth == depth {
            return false;
        }
        self.depth = depth;
        true
    }

    fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    fn set_state(&mut self, state: bool) {
        match &mut self.kind {
            NodeKind::Folder(folder) => folder.state = state,
            NodeKind::Leaf(_) => {
                warn!(node = %self.id, name = %self.name, "State change requested on a leaf; ignored");
            }
        }
    }
}
