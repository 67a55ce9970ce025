//! Content digests
//!
//! A digest identifies a blob by its hash and size. Digests are scoped to an
//! `InstanceName`, so the same hash in two instances refers to two distinct
//! blobs.

mod instance_name;

pub use instance_name::InstanceName;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hash functions recognised by hash length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestFunction {
    Md5,
    Sha1,
    /// SHA-256 and BLAKE3 share the same length; they are not distinguished
    Sha256,
    Sha384,
    Sha512,
}

impl DigestFunction {
    /// Determine the digest function from the length of a hex hash
    pub fn from_hash_length(len: usize) -> Option<Self> {
        match len {
            32 => Some(DigestFunction::Md5),
            40 => Some(DigestFunction::Sha1),
            64 => Some(DigestFunction::Sha256),
            96 => Some(DigestFunction::Sha384),
            128 => Some(DigestFunction::Sha512),
            _ => None,
        }
    }
}

/// Digest as it appears inside a manifest, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDigest {
    pub hash: String,
    pub size_bytes: i64,
}

impl From<&Digest> for WireDigest {
    fn from(digest: &Digest) -> Self {
        WireDigest {
            hash: digest.hash.clone(),
            size_bytes: digest.size_bytes as i64,
        }
    }
}

/// Validated content digest
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest {
    instance_name: InstanceName,
    hash: String,
    size_bytes: u64,
}

impl Digest {
    pub fn instance_name(&self) -> &InstanceName {
        &self.instance_name
    }

    /// Lowercase hexadecimal hash
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn function(&self) -> DigestFunction {
        // Length was validated on construction.
        DigestFunction::from_hash_length(self.hash.len()).unwrap_or(DigestFunction::Sha256)
    }

    /// `<hash>-<size>` form, without the instance name
    pub fn key(&self) -> String {
        format!("{}-{}", self.hash, self.size_bytes)
    }

    pub fn to_wire(&self) -> WireDigest {
        WireDigest::from(self)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.hash, self.size_bytes)
    }
}
