//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::CasFsConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults, an optional file and environment.
    pub fn load(path: Option<&Path>) -> Result<CasFsConfig, ConfigError> {
        MergeService::load(path)
    }

    /// Create default configuration.
    pub fn default() -> CasFsConfig {
        CasFsConfig::default()
    }
}
