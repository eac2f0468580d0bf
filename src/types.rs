//! Core types for the folder/leaf namespace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// NodeId: stable identifier of a node within one namespace.
///
/// Root is always `NodeId::ROOT`; every other node receives the next value of
/// a monotonically increasing counter and keeps it for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Path separator between folder segments.
pub const SEPARATOR: char = '/';

/// Replacement for separators found inside a single name.
pub const SEPARATOR_REPLACEMENT: char = '\\';

/// Name given to nodes whose sanitized name would be empty.
pub const PLACEHOLDER_NAME: &str = "<None>";

/// Depth of Root. Children compute `parent.depth.wrapping_add(1)`, so
/// top-level nodes sit at depth 0 and no other node can reach this value.
pub const ROOT_DEPTH: u32 = u32::MAX;

/// Default upper bound for `" (N)"` probing when generating unique names.
pub const DEFAULT_MAX_DUPLICATES: usize = 999;
