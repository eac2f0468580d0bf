//! Borrowed read handles over namespace nodes.

use crate::tree::iter::Descendants;
use crate::tree::node::{Node, NodeKind, PathNode};
use crate::tree::sort::SortMode;
use crate::tree::FileSystem;
use crate::types::{NodeId, SEPARATOR};

/// A node together with the namespace it lives in.
///
/// Provides the path-aware reads (`full_name`, `parents`, children and
/// descendant iteration) that need more than the node itself.
pub struct NodeRef<'a, T> {
    pub(crate) fs: &'a FileSystem<T>,
    pub(crate) node: &'a Node<T>,
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub fn id(&self) -> NodeId {
        self.node.id
    }

    pub fn node(&self) -> &'a Node<T> {
        self.node
    }

    pub fn is_folder(&self) -> bool {
        self.node.is_folder()
    }

    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    /// Leaf payload, `None` for folders.
    pub fn value(&self) -> Option<&'a T> {
        self.node.value()
    }

    /// Root-to-node path joined by `/`; empty for Root.
    pub fn full_name(&self) -> String {
        let parents = self.parents();
        let mut names: Vec<&str> = parents.iter().rev().map(|p| p.node.name.as_str()).collect();
        if !self.node.is_root() {
            names.push(&self.node.name);
        }
        names.join(&SEPARATOR.to_string())
    }

    /// Ancestors nearest-first, excluding Root.
    pub fn parents(&self) -> Vec<NodeRef<'a, T>> {
        let mut result = Vec::new();
        let mut current = self.node.parent;
        while let Some(id) = current {
            match self.fs.get(id) {
                Some(parent) if !parent.node.is_root() => {
                    current = parent.node.parent;
                    result.push(parent);
                }
                _ => break,
            }
        }
        result
    }

    pub fn parent_ref(&self) -> Option<NodeRef<'a, T>> {
        self.node.parent.and_then(|id| self.fs.get(id))
    }

    /// Direct children in the given presentation order. Empty for leaves.
    pub fn children(&self, mode: SortMode) -> impl Iterator<Item = NodeRef<'a, T>> + 'a {
        let fs = self.fs;
        let ordered = match &self.node.kind {
            NodeKind::Folder(folder) => mode.arrange(&folder.children, &fs.nodes),
            NodeKind::Leaf(_) => Vec::new(),
        };
        ordered.into_iter().filter_map(move |id| fs.get(id))
    }

    /// Lazy depth-first walk of the whole subtree, each folder yielded before
    /// its own descendants.
    pub fn descendants(&self, mode: SortMode) -> Descendants<'a, T> {
        Descendants::new(self.fs, self.node, mode)
    }

    /// Direct sub-folders in storage order.
    pub fn sub_folders(&self) -> impl Iterator<Item = NodeRef<'a, T>> + 'a {
        self.children(SortMode::Lexicographic).filter(NodeRef::is_folder)
    }

    /// Direct leaves in storage order.
    pub fn leaves(&self) -> impl Iterator<Item = NodeRef<'a, T>> + 'a {
        self.children(SortMode::Lexicographic).filter(NodeRef::is_leaf)
    }

    pub fn child_count(&self) -> usize {
        self.node.as_folder().map(|f| f.children.len()).unwrap_or(0)
    }

    pub fn total_descendants(&self) -> usize {
        self.node.as_folder().map(|f| f.total_descendants).unwrap_or(0)
    }

    pub fn total_leaves(&self) -> usize {
        self.node.as_folder().map(|f| f.total_leaves).unwrap_or(0)
    }
}

impl<'a, T> PathNode for NodeRef<'a, T> {
    fn name(&self) -> &str {
        &self.node.name
    }

    fn parent(&self) -> Option<NodeId> {
        self.node.parent
    }

    fn identifier(&self) -> NodeId {
        self.node.id
    }

    fn depth(&self) -> u32 {
        self.node.depth
    }

    fn index(&self) -> usize {
        self.node.index
    }

    fn state(&self) -> bool {
        self.node.state()
    }
}

impl<'a, T: std::fmt::Debug> std::fmt::Debug for NodeRef<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.node.id)
            .field("path", &self.full_name())
            .field("kind", &self.node.kind)
            .finish()
    }
}
