//! Digest computation for manifests and blobs

use crate::digest::{Digest, InstanceName};
use crate::error::DigestError;
use crate::tree::TreeManifest;

/// Compute the BLAKE3 digest of arbitrary content
pub fn blob_digest(instance_name: &InstanceName, content: &[u8]) -> Result<Digest, DigestError> {
    let hash = blake3::hash(content);
    instance_name.new_digest(&hex::encode(hash.as_bytes()), content.len() as i64)
}

/// Compute the digest of a manifest over its canonical JSON encoding
pub fn compute_manifest_digest(
    instance_name: &InstanceName,
    manifest: &TreeManifest,
) -> Result<Digest, DigestError> {
    let encoded = serde_json::to_vec(manifest).map_err(|e| DigestError::Encoding(e.to_string()))?;
    blob_digest(instance_name, &encoded)
}
