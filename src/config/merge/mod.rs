//! Source composition for configuration loading.

pub(crate) mod service;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

/// Builder seeded with the defaults every source is layered over.
pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("namespace.comparer", "case_insensitive")?
        .set_default("namespace.sort_mode", "folders_first")
}
