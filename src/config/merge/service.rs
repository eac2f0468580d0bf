//! MergeService: orchestrates sources, applies merge policy, deserializes to FolioConfig.

use crate::config::sources::{environment, global_file, workspace_file};
use crate::config::FolioConfig;
use config::ConfigError;
use std::path::Path;

/// Merge service for config composition.
pub(crate) struct MergeService;

impl MergeService {
    /// Load config from workspace and standard sources.
    /// Precedence: global file (lowest) -> workspace file -> environment (highest).
    pub(crate) fn load(workspace_root: &Path) -> Result<FolioConfig, ConfigError> {
        let builder = super::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    pub(crate) fn load_from_file(path: &Path) -> Result<FolioConfig, ConfigError> {
        use config::File;

        let builder = super::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path));
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
