//! Error types and internal outcome codes.

use crate::types::NodeId;
use thiserror::Error;

/// Outcome of an internal tree primitive.
///
/// Primitives never fail through `Err`; they report one of these codes and the
/// public operation translates failures into [`NamespaceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Success,
    SuccessNothingDone,
    ItemExists,
    InvalidOperation,
    CircularReference,
    PartialSuccess,
    NoSuccess,
}

/// Result of a successful structural operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The tree changed as requested.
    Done,
    /// The request was valid but already satisfied; nothing changed.
    Unchanged,
    /// The source folder was fully merged into the target and no longer exists.
    Merged,
    /// Some children were relocated; the source folder keeps the blocked rest.
    PartialMerge,
}

/// Recoverable failures reported by namespace operations.
///
/// Every variant describes a user-input problem (a taken name, a bad target);
/// a failing operation leaves the tree untouched unless documented otherwise.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NamespaceError {
    #[error("An item named '{name}' already exists in '{parent}'")]
    NameCollision { name: String, parent: String },

    #[error("'{path}' already exists but is not a folder")]
    WrongTypeCollision { path: String },

    /// `find_or_create_all_folders` hit a non-folder; folders created before
    /// the blocking segment are kept.
    #[error("Cannot create folder '{segment}' in '{reached_path}': a non-folder item is in the way")]
    FolderPathBlocked {
        segment: String,
        reached: NodeId,
        reached_path: String,
    },

    #[error("The root folder cannot be {0}")]
    RootOperation(&'static str),

    #[error("Cannot move '{node}' into '{target}': target is inside the moved folder")]
    CircularReference { node: String, target: String },

    #[error("Nothing from '{from}' could be merged into '{to}'")]
    NothingToMerge { from: String, to: String },

    #[error("Target path is empty")]
    EmptyPath,

    #[error("Could not find a free name for '{0}'")]
    NoUniqueName(String),

    #[error("'{0}' is not a folder")]
    NotAFolder(String),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
}

/// Errors from the layers around the namespace (configuration, logging, CLI).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Namespace(#[from] NamespaceError),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
