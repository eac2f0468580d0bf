//! Configuration
//!
//! Namespace and logging settings, layered from defaults, an optional global
//! file, an optional workspace `folio.toml` and `FOLIO_*` environment variables.

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

use crate::logging::LoggingConfig;
use crate::tree::{ComparerKind, SortMode};
use crate::types::DEFAULT_MAX_DUPLICATES;
use serde::{Deserialize, Serialize};

/// Name of the per-workspace configuration file.
pub const WORKSPACE_CONFIG_FILE: &str = "folio.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub namespace: NamespaceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for a [`FileSystem`](crate::tree::FileSystem).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceConfig {
    /// Sibling order and name equality
    #[serde(default)]
    pub comparer: ComparerKind,

    /// Highest `" (N)"` suffix tried when generating a unique name
    #[serde(default = "default_max_duplicates")]
    pub max_duplicates: usize,

    /// Presentation order used by listing tools
    #[serde(default)]
    pub sort_mode: SortMode,
}

fn default_max_duplicates() -> usize {
    DEFAULT_MAX_DUPLICATES
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            comparer: ComparerKind::default(),
            max_duplicates: default_max_duplicates(),
            sort_mode: SortMode::default(),
        }
    }
}

impl NamespaceConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_duplicates < 2 {
            return Err(format!(
                "max_duplicates must be at least 2 (got {})",
                self.max_duplicates
            ));
        }
        Ok(())
    }
}
