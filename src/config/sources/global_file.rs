//! Global config file in the platform config directory (optional).

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::PathBuf;

/// Platform config file, e.g. `~/.config/folio/config.toml`.
pub(crate) fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "folio", "folio")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub(crate) fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match global_config_path() {
        Some(path) => Ok(builder.add_source(File::from(path).required(false))),
        None => Ok(builder),
    }
}
