//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::FolioConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace directory.
    pub fn load(workspace_root: &Path) -> Result<FolioConfig, ApiError> {
        let config = MergeService::load(workspace_root)?;
        Self::validated(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<FolioConfig, ApiError> {
        let config = MergeService::load_from_file(path)?;
        Self::validated(config)
    }

    /// Create default configuration.
    pub fn default() -> FolioConfig {
        FolioConfig::default()
    }

    fn validated(config: FolioConfig) -> Result<FolioConfig, ApiError> {
        config.namespace.validate().map_err(ApiError::ConfigError)?;
        Ok(config)
    }
}
