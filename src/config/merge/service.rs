//! MergeService: layers the configuration sources over the built-in
//! defaults and deserializes the result into `CasFsConfig`.

use crate::config::CasFsConfig;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File, FileFormat};
use std::path::Path;

use super::merge_policy;

/// Prefix of overriding environment variables, e.g.
/// `CASFS__LOGGING__LEVEL=debug` sets `logging.level`.
pub const ENV_PREFIX: &str = "CASFS";

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> config file -> environment (highest).
    pub fn load(path: Option<&Path>) -> Result<CasFsConfig, ConfigError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        if let Some(path) = path {
            builder = with_file(builder, path)?;
        }
        with_environment(builder).build()?.try_deserialize()
    }
}

/// An explicitly named file must exist; the `config` crate would otherwise
/// report a less specific error at build time.
fn with_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(true)))
}

fn with_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
