//! In-memory manifest store

use super::ManifestStore;
use crate::digest::{Digest, InstanceName};
use crate::error::StorageError;
use crate::tree::hasher::compute_manifest_digest;
use crate::tree::TreeManifest;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Manifest store holding immutable manifest snapshots in memory
#[derive(Default)]
pub struct InMemoryManifestStore {
    manifests: RwLock<HashMap<Digest, Arc<TreeManifest>>>,
    validate: bool,
}

impl InMemoryManifestStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects manifests whose entry lists are not
    /// sorted by name.
    pub fn with_validation(validate: bool) -> Self {
        InMemoryManifestStore {
            manifests: RwLock::new(HashMap::new()),
            validate,
        }
    }

    /// Store a manifest under its computed digest and return that digest
    pub fn insert(
        &self,
        instance_name: &InstanceName,
        manifest: TreeManifest,
    ) -> Result<Digest, StorageError> {
        let digest = compute_manifest_digest(instance_name, &manifest)
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        self.put(digest.clone(), manifest)?;
        Ok(digest)
    }

    pub fn len(&self) -> usize {
        self.manifests.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.manifests.read().is_empty()
    }
}

impl ManifestStore for InMemoryManifestStore {
    fn get(&self, digest: &Digest) -> Result<Option<Arc<TreeManifest>>, StorageError> {
        Ok(self.manifests.read().get(digest).cloned())
    }

    fn put(&self, digest: Digest, manifest: TreeManifest) -> Result<(), StorageError> {
        if self.validate {
            manifest
                .check_sorted()
                .map_err(|reason| StorageError::InvalidManifest {
                    digest: digest.key(),
                    reason,
                })?;
        }
        self.manifests.write().insert(digest, Arc::new(manifest));
        Ok(())
    }
}
