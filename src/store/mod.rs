//! Manifest Store
//!
//! Provides lookup storage for tree manifests keyed by digest. Directory
//! contexts read manifests through this interface; where the bytes come from
//! is up to the implementation.

pub mod bundle;
pub mod memory;

pub use bundle::ManifestBundle;
pub use memory::InMemoryManifestStore;

use crate::digest::Digest;
use crate::error::StorageError;
use crate::tree::TreeManifest;
use std::sync::Arc;

/// Manifest Store interface
pub trait ManifestStore: Send + Sync {
    /// Fetch a manifest. `Ok(None)` means the digest is unknown.
    fn get(&self, digest: &Digest) -> Result<Option<Arc<TreeManifest>>, StorageError>;

    /// Store a manifest under the given digest
    fn put(&self, digest: Digest, manifest: TreeManifest) -> Result<(), StorageError>;
}
