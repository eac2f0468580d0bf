//! Lazy subtree traversal.

use crate::tree::node::{Node, NodeKind};
use crate::tree::sort::SortMode;
use crate::tree::view::NodeRef;
use crate::tree::FileSystem;
use crate::types::NodeId;

/// Depth-first iterator over a folder's descendants.
///
/// Each sub-folder is yielded before anything inside it, so consumers can rely
/// on ancestor-before-descendant order. Children are expanded in the order of
/// the chosen [`SortMode`]. The iterator is finite and cannot be restarted.
pub struct Descendants<'a, T> {
    fs: &'a FileSystem<T>,
    mode: SortMode,
    stack: Vec<NodeId>,
}

impl<'a, T> Descendants<'a, T> {
    pub(crate) fn new(fs: &'a FileSystem<T>, start: &'a Node<T>, mode: SortMode) -> Self {
        let mut iter = Self {
            fs,
            mode,
            stack: Vec::new(),
        };
        iter.push_children(start);
        iter
    }

    fn push_children(&mut self, node: &Node<T>) {
        if let NodeKind::Folder(folder) = &node.kind {
            let ordered = self.mode.arrange(&folder.children, &self.fs.nodes);
            self.stack.extend(ordered.into_iter().rev());
        }
    }
}

impl<'a, T> Iterator for Descendants<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(next) = self.fs.get(id) {
                self.push_children(next.node);
                return Some(next);
            }
        }
        None
    }
}
