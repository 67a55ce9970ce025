//! Instance names scope digests to one execution environment.

use super::{Digest, DigestFunction, WireDigest};
use crate::error::DigestError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Path components that have a fixed meaning in remote execution URLs and
/// may therefore not appear inside an instance name.
const RESERVED_COMPONENTS: &[&str] = &[
    "blobs",
    "uploads",
    "actions",
    "actionResults",
    "operations",
    "capabilities",
    "compressed-blobs",
];

/// Namespace that scopes digests to a particular execution instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstanceName(String);

impl InstanceName {
    /// Validate and create an instance name. The empty string is the
    /// default instance.
    pub fn new(name: &str) -> Result<Self, DigestError> {
        if name.is_empty() {
            return Ok(InstanceName::default());
        }
        let invalid = |reason: String| DigestError::InvalidInstanceName {
            name: name.to_string(),
            reason,
        };
        if name.starts_with('/') || name.ends_with('/') {
            return Err(invalid("leading or trailing slash".to_string()));
        }
        for component in name.split('/') {
            if component.is_empty() {
                return Err(invalid("empty path component".to_string()));
            }
            if component == "." || component == ".." {
                return Err(invalid(format!("component {:?} is not allowed", component)));
            }
            if RESERVED_COMPONENTS.contains(&component) {
                return Err(invalid(format!("component {:?} is a reserved keyword", component)));
            }
        }
        Ok(InstanceName(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create a digest in this instance from a hash and a size
    pub fn new_digest(&self, hash: &str, size_bytes: i64) -> Result<Digest, DigestError> {
        if DigestFunction::from_hash_length(hash.len()).is_none() {
            return Err(DigestError::InvalidHashLength(hash.len()));
        }
        if let Some(c) = hash
            .chars()
            .find(|c| !matches!(c, '0'..='9' | 'a'..='f'))
        {
            return Err(DigestError::InvalidHashCharacter(c));
        }
        if size_bytes < 0 {
            return Err(DigestError::InvalidSize(size_bytes));
        }
        Ok(Digest {
            instance_name: self.clone(),
            hash: hash.to_string(),
            size_bytes: size_bytes as u64,
        })
    }

    /// Parse the digest stored in a manifest entry. Entries without a
    /// digest are malformed.
    pub fn new_digest_from_wire(&self, wire: Option<&WireDigest>) -> Result<Digest, DigestError> {
        let wire = wire.ok_or(DigestError::Missing)?;
        self.new_digest(&wire.hash, wire.size_bytes)
    }

    /// Parse a digest from its `<hash>-<size>` key form
    pub fn parse_digest_key(&self, key: &str) -> Result<Digest, DigestError> {
        let (hash, size) = key
            .rsplit_once('-')
            .ok_or_else(|| DigestError::InvalidKey(key.to_string()))?;
        let size_bytes: i64 = size
            .parse()
            .map_err(|_| DigestError::InvalidKey(key.to_string()))?;
        self.new_digest(hash, size_bytes)
    }
}

impl fmt::Display for InstanceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for InstanceName {
    type Error = DigestError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        InstanceName::new(&value)
    }
}

impl From<InstanceName> for String {
    fn from(value: InstanceName) -> Self {
        value.0
    }
}
