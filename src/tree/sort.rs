//! Presentation orderings applied when iterating children.
//!
//! Sort modes are read-only views: storage order is always comparer order and
//! no sort mode ever mutates it.

use crate::tree::node::Node;
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// All sub-folders, then all leaves; each group in comparer order.
    #[default]
    FoldersFirst,
    /// Plain comparer order, folders and leaves interleaved.
    Lexicographic,
}

impl SortMode {
    pub const ALL: [SortMode; 2] = [SortMode::FoldersFirst, SortMode::Lexicographic];

    pub fn name(self) -> &'static str {
        match self {
            SortMode::FoldersFirst => "Folders First",
            SortMode::Lexicographic => "Lexicographical",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SortMode::FoldersFirst => {
                "In each folder, sort all subfolders lexicographically, then sort all leaves lexicographically."
            }
            SortMode::Lexicographic => {
                "In each folder, sort all children lexicographically, regardless of type."
            }
        }
    }

    /// Arrange `children` (given in storage order) for presentation.
    pub(crate) fn arrange<T>(self, children: &[NodeId], nodes: &HashMap<NodeId, Node<T>>) -> Vec<NodeId> {
        match self {
            SortMode::Lexicographic => children.to_vec(),
            SortMode::FoldersFirst => {
                let is_folder = |id: &&NodeId| nodes.get(id).map(Node::is_folder).unwrap_or(false);
                let folders = children.iter().filter(is_folder);
                let leaves = children.iter().filter(|id| !is_folder(id));
                folders.chain(leaves).copied().collect()
            }
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "folders-first" => Ok(SortMode::FoldersFirst),
            "lexicographic" | "lexicographical" => Ok(SortMode::Lexicographic),
            other => Err(format!(
                "Invalid sort mode: {} (must be 'folders-first' or 'lexicographic')",
                other
            )),
        }
    }
}
