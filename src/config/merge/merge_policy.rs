//! Built-in defaults applied before any configuration source.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder pre-populated with the defaults for every top-level key.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("instance_name", "")?
        .set_default("validate_manifests", false)
}
