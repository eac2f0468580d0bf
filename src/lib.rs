//! Folio: Hierarchical Virtual Namespace
//!
//! An in-memory folder/leaf tree that organizes arbitrary items under stable,
//! browsable paths. Siblings stay sorted and name-unique, moves can never
//! create cycles, and merges report partial success instead of failing.

pub mod concurrency;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod tooling;
pub mod tree;
pub mod types;

pub use error::{ApiError, NamespaceError, Outcome};
pub use events::{ChangeEvent, ChangeKind, SubscriptionId};
pub use tree::{FileSystem, NodeRef, PathNode, SortMode};
pub use types::NodeId;
