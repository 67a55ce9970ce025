//! Configuration
//!
//! Layered configuration built with the `config` crate: built-in defaults,
//! then an optional TOML file, then `CASFS__*` environment variables.

pub mod facade;
pub mod merge;

pub use facade::ConfigLoader;

use crate::digest::InstanceName;
use crate::error::DigestError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level casfs configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CasFsConfig {
    /// Instance name that scopes every digest in the mounted tree
    #[serde(default)]
    pub instance_name: String,

    /// Reject manifests whose entry lists are not sorted when they are
    /// loaded into the store
    #[serde(default)]
    pub validate_manifests: bool,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CasFsConfig {
    pub fn instance_name(&self) -> Result<InstanceName, DigestError> {
        InstanceName::new(&self.instance_name)
    }
}
