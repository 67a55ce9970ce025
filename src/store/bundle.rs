//! Manifest bundles: a root digest plus the manifests reachable from it,
//! stored as a single JSON document.

use super::ManifestStore;
use crate::digest::{Digest, InstanceName};
use crate::error::ApiError;
use crate::tree::TreeManifest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Serialized tree: manifests keyed by `<hash>-<size>`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestBundle {
    #[serde(default)]
    pub instance_name: InstanceName,
    pub root: String,
    #[serde(default)]
    pub manifests: BTreeMap<String, TreeManifest>,
}

impl ManifestBundle {
    pub fn from_file(path: &Path) -> Result<Self, ApiError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Parse the root digest
    pub fn root_digest(&self) -> Result<Digest, ApiError> {
        Ok(self.instance_name.parse_digest_key(&self.root)?)
    }

    /// Copy every manifest into a store and return the root digest
    pub fn load_into(&self, store: &dyn ManifestStore) -> Result<Digest, ApiError> {
        for (key, manifest) in &self.manifests {
            let digest = self.instance_name.parse_digest_key(key)?;
            store.put(digest, manifest.clone())?;
        }
        let root = self.root_digest()?;
        info!(
            manifests = self.manifests.len(),
            root = %root,
            function = ?root.function(),
            "Loaded manifest bundle"
        );
        Ok(root)
    }
}
