//! Folder/Leaf Namespace
//!
//! The namespace engine: a tree of named folders and payload-carrying leaves
//! with comparer-sorted siblings, stable identifiers and path lookup.

pub mod comparer;
mod edit;
mod filesystem;
pub mod iter;
pub mod names;
pub mod node;
pub mod sort;
pub mod view;

pub use comparer::{CaseInsensitiveOrdinal, ComparerKind, Ordinal, SiblingComparer};
pub use filesystem::FileSystem;
pub use iter::Descendants;
pub use node::{Folder, Leaf, Node, NodeKind, PathNode};
pub use sort::SortMode;
pub use view::NodeRef;
