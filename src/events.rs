//! Change notifications raised by the namespace.
//!
//! Events are queued while an operation runs and delivered in order once the
//! operation has committed, so handlers always see the final tree. Handlers
//! only receive shared access to the namespace and therefore cannot mutate it
//! from inside a notification.

use crate::tree::FileSystem;
use crate::types::NodeId;
use serde::{Deserialize, Serialize};

/// Kind of structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    ObjectRenamed,
    ObjectRemoved,
    FolderAdded,
    LeafAdded,
    ObjectMoved,
    FolderMerged,
    PartialMerge,
    /// The whole tree was rebuilt; incremental state should be discarded.
    Reload,
}

/// A single committed change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    /// Node the change applies to. For `ObjectRemoved` and `FolderMerged` the
    /// node no longer exists when the event is delivered.
    pub node: NodeId,
    /// Full path of the node at the time of the change (before removal for
    /// removals, after the change otherwise).
    pub path: String,
    pub previous_parent: Option<NodeId>,
    pub new_parent: Option<NodeId>,
}

/// Handle returned by [`FileSystem::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Notification callback.
pub type ChangeHandler<T> = Box<dyn FnMut(&FileSystem<T>, &ChangeEvent) + Send + Sync>;

/// Small observer list.
pub(crate) struct Observers<T> {
    next_id: u64,
    pub(crate) handlers: Vec<(SubscriptionId, ChangeHandler<T>)>,
}

impl<T> Observers<T> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: 0,
            handlers: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, handler: ChangeHandler<T>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, handler));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sid, _)| *sid != id);
        self.handlers.len() != before
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.handlers.len()
    }
}
